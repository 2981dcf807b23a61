use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Feedback for a single input slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterState {
    #[default]
    Idle,
    Correct,
    Present,
    Absent,
}

impl LetterState {
    /// Whether the letter is proven to be part of the secret.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Correct | Self::Present)
    }
}

/// Scores `guess` against `secret` the way word-guessing games do.
///
/// Exact matches are claimed first, then displaced letters draw from whatever the exact pass left over, so a
/// letter is never reported more often than it occurs in the secret. Both inputs are compared case-insensitively
/// and must have the same number of chars.
pub fn score(guess: &str, secret: &str) -> Result<Vec<LetterState>> {
    let guess: Vec<char> = guess.chars().map(|ch| ch.to_ascii_uppercase()).collect();
    let mut pool: Vec<Option<char>> = secret
        .chars()
        .map(|ch| Some(ch.to_ascii_uppercase()))
        .collect();

    if guess.len() != pool.len() {
        return Err(GameError::LengthMismatch {
            expected: pool.len(),
            actual: guess.len(),
        });
    }

    let mut states = vec![LetterState::Absent; guess.len()];

    for (index, &letter) in guess.iter().enumerate() {
        if pool[index] == Some(letter) {
            states[index] = LetterState::Correct;
            pool[index] = None;
        }
    }

    for (index, &letter) in guess.iter().enumerate() {
        if states[index] == LetterState::Correct {
            continue;
        }
        if let Some(slot) = pool.iter_mut().find(|slot| **slot == Some(letter)) {
            states[index] = LetterState::Present;
            *slot = None;
        }
    }

    Ok(states)
}

/// Letters of `guess` that scored as a hit, in guess order.
pub fn hit_letters<'a>(
    guess: &'a str,
    states: &'a [LetterState],
) -> impl Iterator<Item = char> + 'a {
    guess
        .chars()
        .zip(states)
        .filter(|(_, state)| state.is_hit())
        .map(|(letter, _)| letter)
}
