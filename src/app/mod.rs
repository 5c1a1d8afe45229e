pub mod renderer;

use std::{
    io::{BufRead, Stdout, Write},
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    error::Result,
    generators::{Generator, MazeBuilder},
    maze::{Coord, Grid, GridEvent},
    solvers::{label_distances, max_distance},
};
use renderer::{render_ascii, render_distances};

pub struct App {
    /// Fixed seed for every builder, `None` to seed from system entropy
    seed: Option<u64>,
    /// Ceiling on Aldous-Broder walk steps
    walk_step_limit: Option<u64>,
    /// Largest accepted number of rows or columns
    max_dimension: usize,
    /// Label and print distances from the top-left cell after building
    show_distances: bool,
    /// Replay the carving passage by passage before printing the result
    animate: bool,
    /// Pause between replayed passages
    frame_delay: Duration,
    /// Directory the log file is written to
    log_dir: PathBuf,
}

impl Default for App {
    fn default() -> Self {
        Self {
            seed: None,
            walk_step_limit: None,
            max_dimension: 100,
            show_distances: true,
            animate: false,
            frame_delay: Duration::from_millis(15),
            log_dir: std::env::temp_dir(),
        }
    }
}

impl App {
    const SEED_VAR: &'static str = "MAZE_SEED";
    const WALK_LIMIT_VAR: &'static str = "MAZE_WALK_LIMIT";
    const DISTANCES_VAR: &'static str = "MAZE_DISTANCES";
    const ANIMATE_VAR: &'static str = "MAZE_ANIMATE";
    const LOG_DIR_VAR: &'static str = "MAZE_LOG_DIR";

    /// Default settings, overridden by any `MAZE_*` environment variables set.
    pub fn from_env() -> Self {
        App::with_overrides(|key| std::env::var(key).ok())
    }

    /// Default settings, overridden by whatever `lookup` returns for each
    /// setting's variable name. Unparseable values are logged and ignored.
    pub fn with_overrides<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut app = App::default();
        if let Some(seed) = parse_var(&lookup, App::SEED_VAR) {
            app.seed = Some(seed);
        }
        if let Some(limit) = parse_var(&lookup, App::WALK_LIMIT_VAR) {
            app.walk_step_limit = Some(limit);
        }
        if let Some(flag) = parse_flag(&lookup, App::DISTANCES_VAR) {
            app.show_distances = flag;
        }
        if let Some(flag) = parse_flag(&lookup, App::ANIMATE_VAR) {
            app.animate = flag;
        }
        if let Some(dir) = lookup(App::LOG_DIR_VAR).filter(|dir| !dir.is_empty()) {
            app.log_dir = PathBuf::from(dir);
        }
        app
    }

    pub fn log_dir(&self) -> &std::path::Path {
        &self.log_dir
    }

    /// Ask for dimensions and an algorithm on stdin, then build and print the maze.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let mut input = String::new();
        let mut stdin = std::io::stdin().lock();

        println!(
            "Enter maze dimensions (rows columns). Maximum size is {0}x{0}:",
            self.max_dimension
        );
        stdin.read_line(&mut input)?;
        let (rows, columns) = match parse_dimensions(&input, self.max_dimension) {
            Ok(dims) => dims,
            Err(msg) => {
                eprintln!("{}", msg);
                return Ok(());
            }
        };

        println!("Select maze generation algorithm:");
        for (i, generator) in Generator::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, generator);
        }
        input.clear();
        stdin.read_line(&mut input)?;
        let Some(generator) = parse_generator(&input) else {
            eprintln!("Invalid selection.");
            return Ok(());
        };

        let (event_tx, event_rx) = mpsc::channel();
        let events = self.animate.then_some(event_tx);
        let grid = match self.build(rows, columns, generator, events) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("[app] failed to build {} maze: {}", generator, e);
                eprintln!("Failed to build maze: {}", e);
                return Ok(());
            }
        };

        if self.animate {
            self.replay(stdout, event_rx)?;
        }
        self.print_maze(stdout, &grid, generator)
    }

    /// Build a maze, labelling distances from the top-left cell when enabled.
    pub fn build(
        &self,
        rows: usize,
        columns: usize,
        generator: Generator,
        events: Option<Sender<GridEvent>>,
    ) -> Result<Grid> {
        let mut grid = match events {
            Some(sender) => Grid::with_events(rows, columns, sender)?,
            None => Grid::new(rows, columns)?,
        };

        let mut builder = match self.seed {
            Some(seed) => MazeBuilder::seeded(generator, seed),
            None => MazeBuilder::new(generator),
        };
        if let Some(limit) = self.walk_step_limit {
            builder = builder.with_step_limit(limit);
        }
        builder.build_maze(&mut grid)?;

        if !grid.is_perfect() {
            tracing::warn!("[app] {} produced an imperfect maze", generator);
        }
        if self.show_distances {
            label_distances(&mut grid, Coord::new(0, 0))?;
        }
        tracing::info!("[app] built {}x{} maze with {}", rows, columns, generator);
        Ok(grid)
    }

    /// Redraw the maze after every carved passage, in the order they were carved.
    fn replay(&self, stdout: &mut Stdout, events: Receiver<GridEvent>) -> std::io::Result<()> {
        let mut frame: Option<Grid> = None;
        for event in events.try_iter() {
            if !apply_event(&mut frame, event).map_err(std::io::Error::other)? {
                continue;
            }
            let Some(grid) = frame.as_ref() else {
                continue;
            };
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::Print(render_ascii(grid)),
            )?;
            stdout.flush()?;
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    fn print_maze(
        &self,
        stdout: &mut Stdout,
        grid: &Grid,
        generator: Generator,
    ) -> std::io::Result<()> {
        let title = format!("{} maze ({}x{})\n", generator, grid.rows(), grid.columns());
        queue!(
            stdout,
            style::PrintStyledContent(title.with(Color::Green).attribute(Attribute::Bold)),
            style::Print(render_ascii(grid)),
        )?;

        if self.show_distances {
            queue!(
                stdout,
                style::PrintStyledContent(
                    "Distances from (0, 0)\n".with(Color::Blue).attribute(Attribute::Bold)
                ),
                style::Print(render_distances(grid)),
            )?;
            if let Some((coord, distance)) = max_distance(grid) {
                queue!(
                    stdout,
                    style::PrintStyledContent(
                        format!("Farthest cell: {} at distance {}\n", coord, distance)
                            .with(Color::Yellow)
                    ),
                )?;
            }
        }
        stdout.flush()
    }
}

/// Apply one recorded event to the replayed grid. `Initial` starts a fresh
/// grid; `Linked` carves into it. Returns whether a passage was carved.
fn apply_event(frame: &mut Option<Grid>, event: GridEvent) -> Result<bool> {
    match event {
        GridEvent::Initial { rows, columns } => {
            *frame = Some(Grid::new(rows, columns)?);
            Ok(false)
        }
        GridEvent::Linked { from, direction } => match frame.as_mut() {
            Some(grid) => {
                grid.link(from, direction)?;
                Ok(true)
            }
            None => Ok(false),
        },
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("[config] ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => {
            tracing::warn!("[config] ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

/// Parse `"rows columns"`, each between 1 and `max`.
pub fn parse_dimensions(input: &str, max: usize) -> std::result::Result<(usize, usize), String> {
    let dims = input
        .split_whitespace()
        .take(2)
        .map(|s| s.parse::<usize>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| "Please enter two valid numbers for rows and columns.".to_string())?;

    let &[rows, columns] = dims.as_slice() else {
        return Err("Please enter two valid numbers for rows and columns.".to_string());
    };
    if rows == 0 || columns == 0 {
        return Err("Rows and columns must be at least 1.".to_string());
    }
    if rows > max || columns > max {
        return Err(format!("Rows and columns must be at most {}.", max));
    }
    Ok((rows, columns))
}

/// Parse a 1-based menu selection from [`Generator::ALL`].
pub fn parse_generator(input: &str) -> Option<Generator> {
    let choice = input.trim().parse::<usize>().ok()?;
    Generator::ALL.get(choice.checked_sub(1)?).copied()
}
