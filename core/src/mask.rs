use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of overlay tints hidden cells cycle through.
pub const TINT_COUNT: u8 = 4;

/// How grid cells are ordered before the first `n` of them are revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellOrder {
    /// Ordered by a stable hash of the cell index and the seed, so equal seeds always reveal equal cells.
    Seeded(String),
    /// Shuffled by a PRNG, used while no letter information exists yet.
    Unseeded(u64),
}

impl CellOrder {
    /// Seeded by the discovered letters when there are any, otherwise shuffled with `shuffle_seed`.
    pub fn for_letters(discovered: &DiscoveredLetters, shuffle_seed: u64) -> Self {
        discovered
            .seed()
            .map_or(Self::Unseeded(shuffle_seed), Self::Seeded)
    }

    /// Every cell index of a `total`-cell grid exactly once.
    pub fn order(&self, total: CellCount) -> Vec<CellCount> {
        let mut cells: Vec<CellCount> = (0..total).collect();
        match self {
            Self::Seeded(seed) => {
                cells.sort_by_cached_key(|&index| (stable_hash(&format!("{index}-{seed}")), index));
            }
            Self::Unseeded(rng_seed) => {
                let mut rng = SmallRng::seed_from_u64(*rng_seed);
                cells.shuffle(&mut rng);
            }
        }
        cells
    }
}

/// Deterministic string hash (`h * 31 + c` over 32-bit wrapping arithmetic).
pub fn stable_hash(key: &str) -> u32 {
    key.chars()
        .fold(0i32, |hash, ch| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(ch as i32)
        })
        .unsigned_abs()
}

/// Overlay tint of a hidden cell, in `0..TINT_COUNT`.
pub fn cell_tint(index: CellCount) -> u8 {
    (stable_hash(&format!("{index}-color")) % u32::from(TINT_COUNT)) as u8
}

/// Reveal actually shown to the player: the scheduled percentage or the letter bonus, whichever is larger.
pub fn effective_reveal(
    scheduled: Percent,
    discovered: &DiscoveredLetters,
    title: &NormalizedTitle,
) -> Percent {
    scheduled.max(discovered.coverage(title)).min(FULL_REVEAL)
}

/// Partition of the poster grid into revealed and hidden cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealMask {
    revealed: Array2<bool>,
    revealed_count: CellCount,
}

impl RevealMask {
    pub fn compute(grid: Coord2, percent: Percent, order: &CellOrder) -> Self {
        if percent >= FULL_REVEAL {
            return Self::full(grid);
        }

        let total = mult(grid.0, grid.1);
        let to_reveal = (u32::from(total) * u32::from(percent) / u32::from(FULL_REVEAL)) as CellCount;

        let mut revealed: Array2<bool> = Array2::default(grid.to_nd_index());
        for index in order.order(total).into_iter().take(to_reveal.into()) {
            revealed[cell_coords(grid, index).to_nd_index()] = true;
        }

        log::trace!(
            "mask {}x{} at {}%: {}/{} cells revealed",
            grid.0,
            grid.1,
            percent,
            to_reveal,
            total
        );

        Self {
            revealed,
            revealed_count: to_reveal,
        }
    }

    /// Every cell revealed.
    pub fn full(grid: Coord2) -> Self {
        Self {
            revealed: Array2::from_elem(grid.to_nd_index(), true),
            revealed_count: mult(grid.0, grid.1),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.revealed.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (size_x, size_y) = self.size();
        mult(size_x, size_y)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_full(&self) -> bool {
        self.revealed_count == self.total_cells()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Row-major cell indices that stay covered.
    pub fn hidden_cells(&self) -> impl Iterator<Item = CellCount> + '_ {
        let grid = self.size();
        (0..self.total_cells()).filter(move |&index| !self.is_revealed(cell_coords(grid, index)))
    }
}

/// Coordinates of the row-major cell `index` in a `grid`.
pub const fn cell_coords(grid: Coord2, index: CellCount) -> Coord2 {
    let cols = grid.0 as CellCount;
    ((index % cols) as Coord, (index / cols) as Coord)
}
