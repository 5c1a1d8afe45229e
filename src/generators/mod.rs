use rand::{Rng, SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
mod sidewinder;

pub use aldous_broder::aldous_broder;
pub use binary_tree::binary_tree;
pub use sidewinder::sidewinder;

use crate::{error::Result, maze::Grid};

/// Source of the random choices a maze builder makes.
///
/// Every [`rand::Rng`] is a `RandomSource`. Tests can implement it directly to
/// script exact choices.
pub trait RandomSource {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;

    /// A fair coin. `true` and `false` are equally likely.
    fn coin_flip(&mut self) -> bool {
        self.choose_index(2) == 0
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn choose_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Get a random number generator, optionally seeded for reproducibility.
/// Unseeded generators take their full seed from OS entropy.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::debug!("[generator] fixed seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            tracing::debug!("[generator] seeding from OS entropy");
            StdRng::from_os_rng()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    BinaryTree,
    Sidewinder,
    AldousBroder,
}

impl Generator {
    pub const ALL: [Generator; 3] = [
        Generator::BinaryTree,
        Generator::Sidewinder,
        Generator::AldousBroder,
    ];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::BinaryTree => write!(f, "Binary Tree"),
            Generator::Sidewinder => write!(f, "Sidewinder"),
            Generator::AldousBroder => write!(f, "Aldous-Broder (uniform random walk)"),
        }
    }
}

/// Carves a perfect maze into a grid with one of the [`Generator`] algorithms.
///
/// The builder owns its random source for its whole lifetime. Builders expect a
/// grid with no passages carved yet; running one on an already carved grid
/// does not produce a perfect maze.
pub struct MazeBuilder<R = StdRng> {
    generator: Generator,
    rng: R,
    step_limit: Option<u64>,
}

impl MazeBuilder<StdRng> {
    /// A builder seeded from system entropy.
    pub fn new(generator: Generator) -> Self {
        MazeBuilder::with_rng(generator, get_rng(None))
    }

    /// A builder whose choices are fully determined by `seed`.
    pub fn seeded(generator: Generator, seed: u64) -> Self {
        MazeBuilder::with_rng(generator, get_rng(Some(seed)))
    }
}

impl<R: RandomSource> MazeBuilder<R> {
    pub fn with_rng(generator: Generator, rng: R) -> Self {
        MazeBuilder {
            generator,
            rng,
            step_limit: None,
        }
    }

    /// Caps the number of steps the Aldous-Broder walk may take.
    /// Has no effect on the other algorithms.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    pub fn build_maze(&mut self, grid: &mut Grid) -> Result<()> {
        let existing = grid.link_count();
        if existing != 0 {
            tracing::warn!(
                "[generator] {} running on a grid with {} passages already carved",
                self.generator,
                existing
            );
        }

        match self.generator {
            Generator::BinaryTree => binary_tree(grid, &mut self.rng)?,
            Generator::Sidewinder => sidewinder(grid, &mut self.rng)?,
            Generator::AldousBroder => aldous_broder(grid, &mut self.rng, self.step_limit)?,
        }

        tracing::debug!(
            "[generator] {} carved {} passages in a {}x{} grid",
            self.generator,
            grid.link_count(),
            grid.rows(),
            grid.columns()
        );
        Ok(())
    }
}

pub fn generate_maze(grid: &mut Grid, generator: Generator, seed: Option<u64>) -> Result<()> {
    MazeBuilder::with_rng(generator, get_rng(seed)).build_maze(grid)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::RandomSource;
    use crate::maze::{Direction, Grid};

    /// Replays a fixed list of choices, panicking when it runs dry.
    pub struct ScriptedSource {
        draws: VecDeque<usize>,
    }

    impl ScriptedSource {
        pub fn new(draws: &[usize]) -> Self {
            ScriptedSource {
                draws: draws.iter().copied().collect(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.draws.len()
        }
    }

    impl RandomSource for ScriptedSource {
        fn choose_index(&mut self, len: usize) -> usize {
            let draw = self.draws.pop_front().expect("scripted draws exhausted");
            assert!(draw < len, "scripted draw {} out of range 0..{}", draw, len);
            draw
        }
    }

    pub fn assert_links_symmetric(grid: &Grid) {
        for cell in grid.cells() {
            for (dir, other) in cell.links() {
                assert!(
                    grid.is_linked(other, dir.opposite()),
                    "{} links {} to the {} but not back",
                    cell.coord(),
                    other,
                    dir
                );
            }
            // Link bits only ever point at wired neighbors.
            for dir in Direction::ALL {
                if cell.is_linked(dir) {
                    assert!(cell.neighbor(dir).is_some());
                }
            }
        }
    }

    pub fn assert_spanning_tree(grid: &Grid) {
        assert_links_symmetric(grid);
        assert_eq!(grid.link_count(), grid.size() - 1);
        assert!(grid.is_perfect(), "passages do not connect every cell");
    }
}
