use thiserror::Error;

use crate::model::{BankError, GameSummaryError, ParseGameError, QuestionError};

/// Any error raised by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Parse(#[from] ParseGameError),
    #[error(transparent)]
    Summary(#[from] GameSummaryError),
}
