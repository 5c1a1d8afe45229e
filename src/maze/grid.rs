use std::sync::mpsc::Sender;

use super::{Coord, Direction, cell::Cell};
use crate::error::{Error, Result};
use crate::generators::RandomSource;

/// Changes to the grid, reported to an optional listener as they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Initial { rows: usize, columns: usize },
    Linked { from: Coord, direction: Direction },
}

pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    columns: usize,
    sender: Option<Sender<GridEvent>>,
}

impl Grid {
    /// Creates a `rows` x `columns` grid with every cell wired to its lattice
    /// neighbors and no passages carved.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        Grid::build(rows, columns, None)
    }

    /// Like [`Grid::new`], but reports every change to `sender`.
    pub fn with_events(rows: usize, columns: usize, sender: Sender<GridEvent>) -> Result<Self> {
        Grid::build(rows, columns, Some(sender))
    }

    fn build(rows: usize, columns: usize, sender: Option<Sender<GridEvent>>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(Error::InvalidDimensions { rows, columns });
        }
        let size = rows
            .checked_mul(columns)
            .ok_or(Error::InvalidDimensions { rows, columns })?;

        let mut cells = Vec::with_capacity(size);
        (0..rows).for_each(|row| {
            (0..columns).for_each(|col| cells.push(Cell::new(Coord::new(row, col))));
        });

        let mut grid = Grid {
            cells: cells.into_boxed_slice(),
            rows,
            columns,
            sender,
        };
        grid.configure_cells();

        if let Some(s) = &grid.sender {
            let _ = s.send(GridEvent::Initial { rows, columns });
        }
        tracing::debug!("[grid] initialized {}x{} grid", rows, columns);
        Ok(grid)
    }

    fn configure_cells(&mut self) {
        for idx in 0..self.cells.len() {
            let coord = self.cells[idx].coord();
            for dir in Direction::ALL {
                let neighbor = self.offset(coord, dir);
                self.cells[idx].set_neighbor(dir, neighbor);
            }
        }
    }

    /// The in-bounds coordinate one step from `coord` in `direction`.
    fn offset(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.offset();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.is_in_bounds(next).then_some(next)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.row * self.columns + coord.col
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.is_in_bounds(coord).then(|| &self.cells[self.ravel_index(coord)])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(Cell::coord)
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if self.is_in_bounds(coord) {
            let idx = self.ravel_index(coord);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// The structural neighbor of `coord` in `direction`.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        self.get(coord).and_then(|cell| cell.neighbor(direction))
    }

    pub fn is_linked(&self, coord: Coord, direction: Direction) -> bool {
        self.get(coord).is_some_and(|cell| cell.is_linked(direction))
    }

    /// Uniformly picks one cell of the grid.
    pub fn random_cell<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Coord> {
        if self.cells.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let idx = rng.choose_index(self.cells.len());
        Ok(self.cells[idx].coord())
    }

    /// Carves a passage between `from` and its neighbor in `direction`, on both
    /// sides. Returns the neighbor's coordinate.
    pub fn link(&mut self, from: Coord, direction: Direction) -> Result<Coord> {
        let to = self
            .get(from)
            .ok_or(Error::InvalidCoord { coord: from })?
            .neighbor(direction)
            .ok_or(Error::NoNeighbor {
                coord: from,
                direction,
            })?;

        if let Some(cell) = self.cell_mut(from) {
            cell.set_link(direction);
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.set_link(direction.opposite());
        }

        if let Some(sender) = &self.sender {
            let _ = sender.send(GridEvent::Linked { from, direction });
        }
        Ok(to)
    }

    /// Number of carved passages. Each passage is counted once.
    pub fn link_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                cell.is_linked(Direction::East) as usize + cell.is_linked(Direction::South) as usize
            })
            .sum()
    }

    /// Whether the carved passages form a spanning tree: `size - 1` passages
    /// and every cell reachable from the top-left corner.
    pub fn is_perfect(&self) -> bool {
        if self.link_count() != self.size() - 1 {
            return false;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![Coord::new(0, 0)];
        seen[0] = true;
        let mut reached = 1;
        while let Some(coord) = stack.pop() {
            for (_, next) in self[coord].links() {
                let idx = self.ravel_index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }
        reached == self.cells.len()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}
