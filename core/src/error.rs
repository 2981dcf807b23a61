use alloc::string::String;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Round is over, no new guesses are accepted")]
    NotPlaying,
    #[error("Previous guess is still being evaluated")]
    GuessInFlight,
    #[error("Guess is empty")]
    EmptyGuess,
    #[error("Guess has {actual} letters but the title has {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Feedback belongs to a guess that is no longer pending")]
    StaleFeedback,
    #[error("Result belongs to a round that is no longer current")]
    StaleRound,
    #[error("No secret loaded yet")]
    NotReady,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure of the movie catalog collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Could not decode catalog response: {0}")]
    Decode(String),
    #[error("Catalog has no such movie: {0}")]
    NotFound(String),
    #[error("Movie has no guessable title")]
    EmptyTitle,
}
