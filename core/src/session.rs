use serde::{Deserialize, Serialize};

use crate::*;

/// Where the session stands in fetching and playing the current round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    Loading,
    Failed(FetchError),
    Ready(Game),
}

/// Sequence of rounds, each against a freshly fetched [`Secret`].
///
/// The fetch itself happens outside; the session only tracks which round a result belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    round: RoundId,
    state: SessionState,
}

impl Session {
    /// Starts in [`SessionState::Loading`] for the first round.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            round: RoundId::new(1),
            state: SessionState::Loading,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.state {
            SessionState::Ready(game) => Some(game),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.state {
            SessionState::Ready(game) => Some(game),
            _ => None,
        }
    }

    /// Discards the current round and waits for the next secret. Also used to retry after a failed fetch.
    pub fn new_round(&mut self, board: &mut impl SlotBoard) -> RoundId {
        self.round = self.round.next();
        self.state = SessionState::Loading;
        board.clear();
        log::debug!("round {}: loading", self.round);
        self.round
    }

    /// Installs the fetch result for `round`.
    ///
    /// Results for any other round are dropped, so a slow fetch cannot overwrite a newer round.
    pub fn finish_loading(
        &mut self,
        round: RoundId,
        result: core::result::Result<Secret, FetchError>,
        shuffle_seed: u64,
    ) -> Result<()> {
        if round != self.round || !self.is_loading() {
            log::warn!(
                "round {}: dropping fetch result for round {}",
                self.round,
                round
            );
            return Err(GameError::StaleRound);
        }

        self.state = match result {
            Ok(secret) => {
                log::debug!(
                    "round {}: secret with {} letters",
                    self.round,
                    secret.normalized_title().len()
                );
                SessionState::Ready(Game::new(self.config.clone(), round, secret, shuffle_seed))
            }
            Err(err) => {
                log::error!("round {}: fetch failed: {}", self.round, err);
                SessionState::Failed(err)
            }
        };
        Ok(())
    }

    pub fn submit_guess(&mut self, guess: &str, board: &mut impl SlotBoard) -> Result<GuessOutcome> {
        self.game_mut()
            .ok_or(GameError::NotReady)?
            .submit_guess(guess, board)
    }

    pub fn complete_feedback(
        &mut self,
        ticket: FeedbackTicket,
        board: &mut impl SlotBoard,
    ) -> Result<()> {
        match self.game_mut() {
            Some(game) => game.complete_feedback(ticket, board),
            None => Err(GameError::StaleFeedback),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn secret(title: &str) -> Secret {
        Secret::new(title, None, "", None).unwrap()
    }

    #[test]
    fn starts_loading_and_becomes_ready() {
        let mut session = Session::default();
        assert!(session.is_loading());

        session
            .finish_loading(session.round(), Ok(secret("Up")), 1)
            .unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.round(), session.round());
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn fetch_failure_is_recoverable_by_new_round() {
        let mut session = Session::default();
        let mut slots = LetterSlots::new(0);

        let round = session.round();
        session
            .finish_loading(round, Err(FetchError::Network("offline".to_string())), 0)
            .unwrap();
        assert_eq!(
            session.error(),
            Some(&FetchError::Network("offline".to_string()))
        );
        assert_eq!(
            session.submit_guess("up", &mut slots),
            Err(GameError::NotReady)
        );

        let retry = session.new_round(&mut slots);
        assert_ne!(retry, round);
        session.finish_loading(retry, Ok(secret("Up")), 0).unwrap();
        assert!(session.game().is_some());
    }

    #[test]
    fn late_result_from_previous_round_is_dropped() {
        let mut session = Session::default();
        let mut slots = LetterSlots::new(0);
        let first = session.round();
        let second = session.new_round(&mut slots);

        assert_eq!(
            session.finish_loading(first, Ok(secret("Titanic")), 0),
            Err(GameError::StaleRound)
        );
        assert!(session.is_loading());

        session
            .finish_loading(second, Ok(secret("Gladiator")), 0)
            .unwrap();
        assert_eq!(session.game().unwrap().secret().title(), "Gladiator");
    }

    #[test]
    fn new_round_resets_round_scoped_state() {
        let mut session = Session::default();
        let round = session.round();
        session.finish_loading(round, Ok(secret("Up")), 0).unwrap();
        let mut slots = LetterSlots::new(2);
        session.submit_guess("UX", &mut slots).unwrap();

        let round = session.new_round(&mut slots);
        assert_eq!(slots, LetterSlots::new(2));
        session.finish_loading(round, Ok(secret("Up")), 0).unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.reveal_percentage(), 30);
        assert!(game.discovered().is_empty());
        assert!(game.accepts_guess());
    }

    #[test]
    fn feedback_scheduled_before_new_round_is_stale() {
        let mut session = Session::default();
        let mut slots = LetterSlots::new(2);
        let round = session.round();
        session.finish_loading(round, Ok(secret("Up")), 0).unwrap();
        let GuessOutcome::Missed { feedback, .. } = session.submit_guess("UX", &mut slots).unwrap()
        else {
            panic!("expected a miss");
        };

        let round = session.new_round(&mut slots);
        assert_eq!(
            session.complete_feedback(feedback, &mut slots),
            Err(GameError::StaleFeedback)
        );

        session.finish_loading(round, Ok(secret("Up")), 0).unwrap();
        assert_eq!(
            session.complete_feedback(feedback, &mut slots),
            Err(GameError::StaleFeedback)
        );
        assert_eq!(slots, LetterSlots::new(2));
    }
}
