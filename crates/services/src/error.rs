//! Shared error types for the services crate.

use thiserror::Error;

use bio_core::model::GameSummaryError;
use storage::StorageError;

use crate::games::Phase;

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TutorialService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorialError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by game sessions.
///
/// A wrong answer is never an error; these cover calls that do not fit the
/// session's current phase and failures of the stats store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this configuration")]
    Empty,
    #[error("pick a configuration before playing")]
    NotConfigured,
    #[error("session is already configured")]
    AlreadyConfigured,
    #[error("session already completed")]
    Completed,
    #[error("cannot {action} while {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("current question is not resolved yet")]
    Unresolved,
    #[error("this game has no hints")]
    HintsUnsupported,
    #[error("all hints are already revealed")]
    HintsExhausted,
    #[error("this game cannot reshuffle its options")]
    ReshuffleUnsupported,
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),
    #[error(transparent)]
    Summary(#[from] GameSummaryError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}
