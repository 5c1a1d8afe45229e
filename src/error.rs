use thiserror::Error;

use crate::maze::{Coord, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid grid dimensions {rows}x{columns}: both must be positive")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cannot pick a random cell from an empty grid")]
    EmptyGrid,

    #[error("start cell {start} is outside the {rows}x{columns} grid")]
    InvalidStart {
        start: Coord,
        rows: usize,
        columns: usize,
    },

    #[error("cell {coord} is outside the grid")]
    InvalidCoord { coord: Coord },

    #[error("cell {coord} has no neighbor to the {direction}")]
    NoNeighbor { coord: Coord, direction: Direction },

    /// The random walk hit its configured step ceiling before visiting every cell.
    #[error("random walk stopped after {steps} steps with {unvisited} cells unvisited")]
    StepLimitExceeded { steps: u64, unvisited: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
