use super::RandomSource;
use crate::{
    error::Result,
    maze::{Coord, Direction, Grid},
};

/// Links every cell to either its north or its east neighbor.
///
/// Rows are scanned from the last to the first, columns left to right. The
/// top-right corner has neither neighbor and is the root every passage leads
/// towards, which is why the first row and the last column come out as
/// straight corridors.
pub fn binary_tree<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<()> {
    for row in (0..grid.rows()).rev() {
        for col in 0..grid.columns() {
            let coord = Coord::new(row, col);
            let cell = &grid[coord];
            let candidates = [Direction::North, Direction::East]
                .into_iter()
                .filter(|&dir| cell.neighbor(dir).is_some())
                .collect::<Vec<_>>();

            // Only the top-right corner has nowhere to go
            if candidates.is_empty() {
                continue;
            }
            let direction = candidates[rng.choose_index(candidates.len())];
            grid.link(coord, direction)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{ScriptedSource, assert_spanning_tree};

    fn linked(grid: &Grid) -> Vec<(Coord, Direction)> {
        grid.cells()
            .flat_map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&dir| cell.is_linked(dir))
                    .map(move |dir| (cell.coord(), dir))
            })
            .collect()
    }

    #[test]
    fn test_scripted_east_first() {
        let mut grid = Grid::new(2, 2).unwrap();
        // (1,0) picks east, (1,1) and (0,0) each have a single candidate.
        let mut rng = ScriptedSource::new(&[1, 0, 0]);
        binary_tree(&mut grid, &mut rng).unwrap();

        assert_eq!(rng.remaining(), 0);
        assert_spanning_tree(&grid);
        assert_eq!(
            linked(&grid),
            vec![
                (Coord::new(0, 0), Direction::East),
                (Coord::new(0, 1), Direction::South),
                (Coord::new(1, 0), Direction::East),
            ]
        );
    }

    #[test]
    fn test_scripted_north_first() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut rng = ScriptedSource::new(&[0, 0, 0]);
        binary_tree(&mut grid, &mut rng).unwrap();

        assert_spanning_tree(&grid);
        assert_eq!(
            linked(&grid),
            vec![
                (Coord::new(0, 0), Direction::East),
                (Coord::new(0, 0), Direction::South),
                (Coord::new(0, 1), Direction::South),
            ]
        );
    }

    #[test]
    fn test_every_cell_but_the_root_draws_once() {
        let mut grid = Grid::new(3, 4).unwrap();
        let mut rng = ScriptedSource::new(&[0; 11]);
        binary_tree(&mut grid, &mut rng).unwrap();
        assert_eq!(rng.remaining(), 0);
        assert_spanning_tree(&grid);
        assert!(!grid.is_linked(Coord::new(0, 3), Direction::East));
    }

    #[test]
    fn test_index_zero_still_links() {
        // A draw of 0 picks north wherever north exists; no cell is skipped.
        let mut grid = Grid::new(4, 4).unwrap();
        let mut rng = ScriptedSource::new(&[0; 15]);
        binary_tree(&mut grid, &mut rng).unwrap();
        assert_eq!(grid.link_count(), 15);
        for row in 1..4 {
            for col in 0..4 {
                assert!(grid.is_linked(Coord::new(row, col), Direction::North));
            }
        }
    }
}
