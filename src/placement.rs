use crate::Coordinate;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt::Debug;

/// Strategy deciding where mines go once the first tile is revealed.
pub trait MinePlacement: Debug + Send + Sync {
    /// Returns the mine coordinates for a `width` x `height` grid. Coordinates
    /// in `exclude` are the first reveal and its neighbors.
    fn place(
        &self,
        width: u32,
        height: u32,
        count: u32,
        exclude: &HashSet<Coordinate>,
    ) -> HashSet<Coordinate>;
}

/// Uniform rejection sampling driven by a fixed seed, so the same seed and
/// first click always produce the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPlacement {
    seed: u64,
}

impl RandomPlacement {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacement for RandomPlacement {
    fn place(
        &self,
        width: u32,
        height: u32,
        count: u32,
        exclude: &HashSet<Coordinate>,
    ) -> HashSet<Coordinate> {
        let eligible = (1..=width as i32)
            .cartesian_product(1..=height as i32)
            .filter(|&(x, y)| !exclude.contains(&Coordinate::new(x, y)))
            .count();

        // sampling would never terminate
        if (count as usize) > eligible {
            log::warn!(
                "Only {} tiles can hold mines outside the safe zone, requested {}",
                eligible,
                count
            );
            return (1..=width as i32)
                .cartesian_product(1..=height as i32)
                .map(|(x, y)| Coordinate::new(x, y))
                .filter(|coord| !exclude.contains(coord))
                .collect();
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut taken = exclude.clone();
        let mut mines = HashSet::with_capacity(count as usize);

        while mines.len() < count as usize {
            let coord = Coordinate::new(
                rng.gen_range(1..=width as i32),
                rng.gen_range(1..=height as i32),
            );
            if taken.insert(coord) {
                mines.insert(coord);
            }
        }

        mines
    }
}

/// A predetermined layout. Coordinates outside the grid are dropped; the
/// safe zone and target count are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedPlacement {
    mines: Vec<Coordinate>,
}

impl FixedPlacement {
    pub fn new(mines: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacement for FixedPlacement {
    fn place(
        &self,
        width: u32,
        height: u32,
        _count: u32,
        _exclude: &HashSet<Coordinate>,
    ) -> HashSet<Coordinate> {
        self.mines
            .iter()
            .copied()
            .filter(|c| c.x >= 1 && c.y >= 1 && c.x <= width as i32 && c.y <= height as i32)
            .collect()
    }
}
