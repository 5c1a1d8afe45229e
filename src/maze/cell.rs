use super::{Coord, Direction};

/// A single lattice position.
///
/// Neighbors are structural: they are wired once by [`Grid`](super::Grid) and
/// never change. Links (carved passages) are the only mutable relation and are
/// only ever written through the grid, which keeps them symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    /// Indexed by `Direction as usize` in N, S, E, W order.
    neighbors: [Option<Coord>; 4],
    /// Bitmask of linked directions, see `Direction::bit`.
    links: u8,
    /// Hop distance from the last start cell, `None` when unset.
    distance: Option<u32>,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Self {
        Cell {
            coord,
            neighbors: [None; 4],
            links: 0,
            distance: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    /// The structural neighbor in `direction`, or `None` at the grid boundary.
    pub fn neighbor(&self, direction: Direction) -> Option<Coord> {
        self.neighbors[direction as usize]
    }

    /// All structural neighbors in N, S, E, W order.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(dir).map(|coord| (dir, coord)))
    }

    pub fn is_linked(&self, direction: Direction) -> bool {
        self.links & direction.bit() != 0
    }

    /// Linked neighbors in N, S, E, W order.
    pub fn links(&self) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        self.neighbors().filter(move |&(dir, _)| self.is_linked(dir))
    }

    pub fn link_count(&self) -> usize {
        self.links.count_ones() as usize
    }

    pub fn has_links(&self) -> bool {
        self.links != 0
    }

    pub fn distance(&self) -> Option<u32> {
        self.distance
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, coord: Option<Coord>) {
        self.neighbors[direction as usize] = coord;
    }

    pub(crate) fn set_link(&mut self, direction: Direction) {
        self.links |= direction.bit();
    }

    pub(crate) fn set_distance(&mut self, distance: Option<u32>) {
        self.distance = distance;
    }
}
