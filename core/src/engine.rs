use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Board update deferred until the player had a moment to read the feedback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackAction {
    /// Every letter was absent, wipe the unlocked slots.
    ClearBoard,
    /// Some letters hit, lock the discovered ones in place.
    Prefill,
}

/// Handle for a pending [`FeedbackAction`]; only the ticket of the current guess is honoured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTicket {
    round: RoundId,
    attempt: u8,
    action: FeedbackAction,
    delay_ms: u32,
}

impl FeedbackTicket {
    pub const fn round(self) -> RoundId {
        self.round
    }

    pub const fn action(self) -> FeedbackAction {
        self.action
    }

    pub const fn delay_ms(self) -> u32 {
        self.delay_ms
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Phase {
    Playing,
    /// A missed guess is on screen; no new guess until its feedback completes.
    Evaluating(FeedbackTicket),
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    Won,
    Missed {
        states: Vec<LetterState>,
        feedback: FeedbackTicket,
    },
    Lost {
        states: Vec<LetterState>,
    },
}

impl GuessOutcome {
    pub fn states(&self) -> &[LetterState] {
        match self {
            Self::Won => &[],
            Self::Missed { states, .. } | Self::Lost { states } => states,
        }
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Won | Self::Lost { .. })
    }
}

/// One round of guessing against a single [`Secret`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    round: RoundId,
    secret: Secret,
    title: NormalizedTitle,
    attempts: u8,
    reveal: Percent,
    discovered: DiscoveredLetters,
    phase: Phase,
    message: String,
    shuffle_seed: u64,
}

impl Game {
    /// `shuffle_seed` drives the cell order until the first letter is discovered.
    pub fn new(config: GameConfig, round: RoundId, secret: Secret, shuffle_seed: u64) -> Self {
        let title = secret.normalized_title();
        let reveal = config.scheduled_reveal(0);
        Self {
            config,
            round,
            secret,
            title,
            attempts: 0,
            reveal,
            discovered: DiscoveredLetters::new(),
            phase: Phase::Playing,
            message: String::new(),
            shuffle_seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn title(&self) -> &NormalizedTitle {
        &self.title
    }

    pub fn slot_count(&self) -> usize {
        self.title.len()
    }

    pub fn status(&self) -> GameStatus {
        match self.phase {
            Phase::Playing | Phase::Evaluating(_) => GameStatus::Playing,
            Phase::Won => GameStatus::Won,
            Phase::Lost => GameStatus::Lost,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    pub fn is_evaluating(&self) -> bool {
        matches!(self.phase, Phase::Evaluating(_))
    }

    /// Whether a guess submitted now would be evaluated.
    pub fn accepts_guess(&self) -> bool {
        matches!(self.phase, Phase::Playing)
    }

    pub fn pending_feedback(&self) -> Option<FeedbackTicket> {
        match self.phase {
            Phase::Evaluating(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn attempts_left(&self) -> u8 {
        self.config.max_attempts.saturating_sub(self.attempts)
    }

    /// Schedule-driven reveal percentage.
    pub fn reveal_percentage(&self) -> Percent {
        self.reveal
    }

    /// Reveal including the discovered-letter bonus; always full once the round is over.
    pub fn effective_reveal(&self) -> Percent {
        if self.is_finished() {
            FULL_REVEAL
        } else {
            effective_reveal(self.reveal, &self.discovered, &self.title)
        }
    }

    pub fn discovered(&self) -> &DiscoveredLetters {
        &self.discovered
    }

    /// Status line for the player, empty until the first guess.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cell_order(&self) -> CellOrder {
        CellOrder::for_letters(&self.discovered, self.shuffle_seed)
    }

    pub fn reveal_mask(&self) -> RevealMask {
        RevealMask::compute(self.config.grid, self.effective_reveal(), &self.cell_order())
    }

    pub fn prefill(&self) -> Prefill {
        prefill_positions(&self.title, &self.discovered)
    }

    pub fn submit_guess(&mut self, guess: &str, board: &mut impl SlotBoard) -> Result<GuessOutcome> {
        match self.phase {
            Phase::Playing => {}
            Phase::Evaluating(_) => return Err(GameError::GuessInFlight),
            Phase::Won | Phase::Lost => return Err(GameError::NotPlaying),
        }

        let guess = NormalizedTitle::new(guess.trim());
        if guess.is_empty() {
            return Err(GameError::EmptyGuess);
        }

        if guess == self.title {
            log::debug!("round {}: solved after {} misses", self.round, self.attempts);
            self.reveal = FULL_REVEAL;
            self.phase = Phase::Won;
            self.message = format!(
                "Brilliant deduction, detective! You've cracked the case of \"{}\"!",
                self.secret.title()
            );
            return Ok(GuessOutcome::Won);
        }

        let states = score(guess.as_str(), self.title.as_str())?;
        self.discovered = self.discovered.accumulate(&states, guess.as_str());
        board.apply_states(&states);
        self.attempts += 1;

        log::debug!(
            "round {}: miss {}/{} '{}', discovered {:?}",
            self.round,
            self.attempts,
            self.config.max_attempts,
            guess,
            self.discovered.seed()
        );

        if self.attempts >= self.config.max_attempts {
            self.reveal = FULL_REVEAL;
            self.phase = Phase::Lost;
            self.message = format!(
                "Mystery unsolved! The film was \"{}\". Better luck on your next case, detective.",
                self.secret.title()
            );
            return Ok(GuessOutcome::Lost { states });
        }

        self.reveal = self.reveal.max(self.config.scheduled_reveal(self.attempts));
        self.message = format!(
            "Not quite! The plot thickens... {} clues remaining.",
            self.attempts_left()
        );

        let feedback = if states.iter().any(|state| state.is_hit()) {
            FeedbackTicket {
                round: self.round,
                attempt: self.attempts,
                action: FeedbackAction::Prefill,
                delay_ms: self.config.prefill_delay_ms,
            }
        } else {
            FeedbackTicket {
                round: self.round,
                attempt: self.attempts,
                action: FeedbackAction::ClearBoard,
                delay_ms: self.config.clear_delay_ms,
            }
        };
        self.phase = Phase::Evaluating(feedback);

        Ok(GuessOutcome::Missed { states, feedback })
    }

    /// Applies the deferred board update of the pending guess and accepts guesses again.
    ///
    /// Tickets from another round or an already completed guess are rejected without touching the board.
    pub fn complete_feedback(
        &mut self,
        ticket: FeedbackTicket,
        board: &mut impl SlotBoard,
    ) -> Result<()> {
        if ticket.round != self.round || self.phase != Phase::Evaluating(ticket) {
            log::warn!(
                "round {}: dropping stale feedback {:?} from round {}",
                self.round,
                ticket.action,
                ticket.round
            );
            return Err(GameError::StaleFeedback);
        }

        match ticket.action {
            FeedbackAction::ClearBoard => {
                board.clear();
                // letters locked by earlier guesses stay locked
                if !self.discovered.is_empty() {
                    board.prefill(&self.prefill());
                }
            }
            FeedbackAction::Prefill => board.prefill(&self.prefill()),
        }
        self.phase = Phase::Playing;
        Ok(())
    }
}
