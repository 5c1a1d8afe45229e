use crate::{
    error::{Error, Result},
    maze::{Coord, Grid},
};

/// Resets every cell's distance label to unset.
pub fn clear_distances(grid: &mut Grid) {
    grid.cells_mut().for_each(|cell| cell.set_distance(None));
}

/// Labels every cell reachable from `start` with its hop distance, expanding
/// one breadth-first layer at a time along carved passages.
///
/// Labels are not cleared first: cells that already carry a distance are
/// treated as reached. Use [`label_distances`] to clear and compute in one go.
pub fn compute_distances(grid: &mut Grid, start: Coord) -> Result<()> {
    if !grid.is_in_bounds(start) {
        return Err(Error::InvalidStart {
            start,
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    set_distance(grid, start, 0);

    let mut frontier = vec![start];
    let mut distance: u32 = 0;
    while !frontier.is_empty() {
        distance += 1;
        let mut next_frontier = Vec::new();
        for &coord in &frontier {
            let reached = grid[coord]
                .links()
                .map(|(_, next)| next)
                .filter(|&next| grid[next].distance().is_none())
                .collect::<Vec<_>>();
            for next in reached {
                set_distance(grid, next, distance);
                next_frontier.push(next);
            }
        }
        frontier = next_frontier;
    }

    tracing::debug!(
        "[distances] labelled from {}, deepest layer {}",
        start,
        distance - 1
    );
    Ok(())
}

fn set_distance(grid: &mut Grid, coord: Coord, distance: u32) {
    if let Some(cell) = grid.cell_mut(coord) {
        cell.set_distance(Some(distance));
    }
}

/// Clears all labels, then labels distances from `start`.
pub fn label_distances(grid: &mut Grid, start: Coord) -> Result<()> {
    clear_distances(grid);
    compute_distances(grid, start)
}

/// The labelled cell farthest from the start, first in row-major order on ties.
pub fn max_distance(grid: &Grid) -> Option<(Coord, u32)> {
    grid.cells()
        .filter_map(|cell| cell.distance().map(|d| (cell.coord(), d)))
        .fold(None, |best, (coord, d)| match best {
            Some((_, best_d)) if best_d >= d => best,
            _ => Some((coord, d)),
        })
}
