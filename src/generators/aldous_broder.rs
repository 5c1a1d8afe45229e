use super::RandomSource;
use crate::{
    error::{Error, Result},
    maze::{Coord, Direction, Grid},
};

/// Random walk from a random cell, carving a passage whenever the walk steps
/// into a cell it has never been to. Produces every spanning tree of the grid
/// with equal probability.
///
/// A cell counts as visited once it has a passage, so the grid must start with
/// none carved. The walk ends with probability 1 but its length is unbounded;
/// `step_limit` caps it and reports [`Error::StepLimitExceeded`] when reached.
pub fn aldous_broder<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    step_limit: Option<u64>,
) -> Result<()> {
    let mut current = grid.random_cell(rng)?;
    let mut unvisited = grid.size() - 1;
    let mut steps: u64 = 0;

    while unvisited > 0 {
        if step_limit.is_some_and(|limit| steps >= limit) {
            tracing::warn!(
                "[aldous-broder] giving up after {} steps, {} cells unvisited",
                steps,
                unvisited
            );
            return Err(Error::StepLimitExceeded { steps, unvisited });
        }

        let mut options = [(Direction::North, current); 4];
        let mut len = 0;
        for neighbor in grid[current].neighbors() {
            options[len] = neighbor;
            len += 1;
        }
        let (direction, next): (Direction, Coord) = options[rng.choose_index(len)];

        if !grid[next].has_links() {
            grid.link(current, direction)?;
            unvisited -= 1;
        }
        current = next;
        steps += 1;
    }

    tracing::debug!("[aldous-broder] walk covered the grid in {} steps", steps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::generators::testing::{ScriptedSource, assert_spanning_tree};

    /// Identifies a carved tree by its east and south passages.
    fn tree_key(grid: &Grid) -> u64 {
        grid.cells().fold(0u64, |key, cell| {
            let key = key << 2;
            key | (cell.is_linked(Direction::East) as u64)
                | ((cell.is_linked(Direction::South) as u64) << 1)
        })
    }

    fn tree_counts(rows: usize, columns: usize, runs: usize, seed: u64) -> HashMap<u64, usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = HashMap::new();
        for _ in 0..runs {
            let mut grid = Grid::new(rows, columns).unwrap();
            aldous_broder(&mut grid, &mut rng, None).unwrap();
            assert_spanning_tree(&grid);
            *counts.entry(tree_key(&grid)).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_scripted_walk() {
        let mut grid = Grid::new(1, 3).unwrap();
        // Start at (0,1); east to (0,2), back west to (0,1), west to (0,0).
        // (0,1) has neighbors [east, west] and (0,2) only [west].
        let mut rng = ScriptedSource::new(&[1, 0, 0, 1]);
        aldous_broder(&mut grid, &mut rng, None).unwrap();

        assert_eq!(rng.remaining(), 0);
        assert_spanning_tree(&grid);
        assert!(grid.is_linked(Coord::new(0, 1), Direction::East));
        assert!(grid.is_linked(Coord::new(0, 1), Direction::West));
    }

    #[test]
    fn test_revisits_do_not_carve() {
        let mut grid = Grid::new(1, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        aldous_broder(&mut grid, &mut rng, None).unwrap();
        assert_eq!(grid.link_count(), 1);
    }

    #[test]
    fn test_square_reaches_all_four_trees() {
        let counts = tree_counts(2, 2, 2000, 17);
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| n > 350), "{:?}", counts);
    }

    #[test]
    fn test_uniform_over_spanning_trees() {
        // A 2x3 grid has exactly 15 spanning trees.
        let runs = 15_000;
        let counts = tree_counts(2, 3, runs, 2024);
        assert_eq!(counts.len(), 15);

        let expected = runs as f64 / 15.0;
        let chi_squared: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 14 degrees of freedom, p = 0.001
        assert!(chi_squared < 36.12, "chi-squared {} too large", chi_squared);
    }

    #[test]
    fn test_step_limit_zero_on_single_cell() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        aldous_broder(&mut grid, &mut rng, Some(0)).unwrap();
        assert_eq!(grid.link_count(), 0);
    }
}
