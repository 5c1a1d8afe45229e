use super::RandomSource;
use crate::{
    error::Result,
    maze::{Coord, Direction, Grid},
};

/// Carves each row as runs of east-linked cells, closing every run with a single
/// passage north from one of its members.
///
/// The first row has nothing to the north, so it is never closed early and ends
/// up as one long corridor.
pub fn sidewinder<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<()> {
    let mut run: Vec<Coord> = Vec::with_capacity(grid.columns());

    for row in 0..grid.rows() {
        run.clear();
        for col in 0..grid.columns() {
            let coord = Coord::new(row, col);
            run.push(coord);

            let cell = &grid[coord];
            let at_east_bound = cell.neighbor(Direction::East).is_none();
            let at_north_bound = cell.neighbor(Direction::North).is_none();

            let should_close_out = at_east_bound || (!at_north_bound && rng.coin_flip());

            if should_close_out {
                if !at_north_bound {
                    let member = run[rng.choose_index(run.len())];
                    grid.link(member, Direction::North)?;
                }
                run.clear();
            } else {
                grid.link(coord, Direction::East)?;
            }
        }
    }
    Ok(())
}
