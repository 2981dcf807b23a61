#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use letters::*;
pub use mask::*;
pub use scorer::*;
pub use secret::*;
pub use session::*;
pub use slots::*;
pub use types::*;

mod catalog;
mod engine;
mod error;
mod letters;
mod mask;
mod scorer;
mod secret;
mod session;
mod slots;
mod types;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;
pub const DEFAULT_REVEAL_SCHEDULE: [Percent; 3] = [30, 60, 100];
pub const DEFAULT_GRID: Coord2 = (15, 15);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_attempts: u8,
    /// Reveal percentage indexed by the number of attempts already made.
    pub reveal_schedule: Vec<Percent>,
    pub grid: Coord2,
    /// Pause after an all-absent guess before the board is cleared.
    pub clear_delay_ms: u32,
    /// Pause after a partially-correct guess before discovered letters are prefilled.
    pub prefill_delay_ms: u32,
}

impl GameConfig {
    pub fn new(max_attempts: u8, reveal_schedule: &[Percent], (size_x, size_y): Coord2) -> Self {
        let max_attempts = max_attempts.max(1);
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);

        let mut schedule = Vec::with_capacity(reveal_schedule.len());
        let mut floor = 0;
        for &percent in reveal_schedule {
            floor = percent.clamp(floor, FULL_REVEAL);
            schedule.push(floor);
        }
        if schedule.is_empty() {
            log::warn!("Empty reveal schedule, falling back to full reveal");
            schedule.push(FULL_REVEAL);
        }

        Self {
            max_attempts,
            reveal_schedule: schedule,
            grid: (size_x, size_y),
            ..Self::default()
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid.0, self.grid.1)
    }

    /// Scheduled reveal percentage once `attempts` guesses have been made.
    ///
    /// Attempts past the end of the schedule keep its last entry.
    pub fn scheduled_reveal(&self, attempts: u8) -> Percent {
        self.reveal_schedule
            .get(usize::from(attempts))
            .or(self.reveal_schedule.last())
            .copied()
            .unwrap_or(FULL_REVEAL)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reveal_schedule: vec![30, 60, 100],
            grid: DEFAULT_GRID,
            clear_delay_ms: 1000,
            prefill_delay_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_constant() {
        let config = GameConfig::default();
        assert_eq!(config.reveal_schedule, DEFAULT_REVEAL_SCHEDULE);
        assert_eq!(config.total_cells(), 225);
    }

    #[test]
    fn new_clamps_schedule_to_non_decreasing_percentages() {
        let config = GameConfig::new(0, &[50, 20, 250], (0, 4));

        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.reveal_schedule, [50, 50, 100]);
        assert_eq!(config.grid, (1, 4));
    }

    #[test]
    fn scheduled_reveal_saturates_at_last_entry() {
        let config = GameConfig::default();

        assert_eq!(config.scheduled_reveal(0), 30);
        assert_eq!(config.scheduled_reveal(1), 60);
        assert_eq!(config.scheduled_reveal(2), 100);
        assert_eq!(config.scheduled_reveal(7), 100);
    }
}
