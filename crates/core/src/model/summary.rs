use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::game::GameKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct ({correct}) + incorrect ({incorrect}) exceeds {rounds} rounds")]
    CountMismatch {
        rounds: u32,
        correct: u32,
        incorrect: u32,
    },
}

/// End-of-session numbers shown on the summary screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    game: GameKind,
    rounds: u32,
    correct: u32,
    incorrect: u32,
    score: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl GameSummary {
    /// # Errors
    ///
    /// Returns `GameSummaryError` if the timestamps are reversed or the
    /// outcome counts do not fit in the number of rounds.
    pub fn new(
        game: GameKind,
        rounds: u32,
        correct: u32,
        incorrect: u32,
        score: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, GameSummaryError> {
        if completed_at < started_at {
            return Err(GameSummaryError::InvalidTimeRange);
        }
        if correct.saturating_add(incorrect) > rounds {
            return Err(GameSummaryError::CountMismatch {
                rounds,
                correct,
                incorrect,
            });
        }
        Ok(Self {
            game,
            rounds,
            correct,
            incorrect,
            score,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn game(&self) -> GameKind {
        self.game
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// Rounds left without a final verdict (matching sets abandoned unsolved).
    #[must_use]
    pub fn unresolved(&self) -> u32 {
        self.rounds - self.correct - self.incorrect
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_rejects_reversed_time_range() {
        let now = fixed_now();
        let err = GameSummary::new(
            GameKind::Levers,
            3,
            1,
            1,
            10,
            now,
            now - chrono::Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err, GameSummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_counts_unresolved_rounds() {
        let now = fixed_now();
        let summary = GameSummary::new(GameKind::Matching, 2, 1, 0, 80, now, now).unwrap();
        assert_eq!(summary.unresolved(), 1);
        assert!(GameSummary::new(GameKind::Matching, 1, 1, 1, 0, now, now).is_err());
    }
}
