use std::time::{Duration, Instant};

use perfect_maze::{
    generators::{Generator, MazeBuilder},
    logging,
    maze::Grid,
};

const ROWS: usize = 100;
const COLUMNS: usize = 100;

/// Average time per maze; zero iterations count as one.
fn mean_duration(total: Duration, iterations: usize) -> Duration {
    total.div_f64(iterations.max(1) as f64)
}

fn main() -> perfect_maze::Result<()> {
    let _guard = logging::init_tracing(&std::env::temp_dir()).ok();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    for generator in Generator::ALL {
        let mut builder = MazeBuilder::new(generator);
        let start = Instant::now();
        for _ in 0..num_iters {
            let mut grid = Grid::new(ROWS, COLUMNS)?;
            builder.build_maze(&mut grid)?;
            if !grid.is_perfect() {
                tracing::error!("[profile] {} produced an imperfect maze", generator);
            }
        }
        let elapsed = start.elapsed();
        tracing::info!(
            "[profile] {} x{} on {}x{}: {:?}",
            generator,
            num_iters,
            ROWS,
            COLUMNS,
            elapsed
        );
        println!(
            "{:<40} {:>4} mazes  {:>10.2?} total  {:>10.2?} each",
            generator.to_string(),
            num_iters,
            elapsed,
            mean_duration(elapsed, num_iters)
        );
    }
    Ok(())
}
