#![forbid(unsafe_code)]

pub mod error;
pub mod games;
pub mod stats_service;
pub mod tutorial_service;

pub use bio_core::{Clock, Shuffler};

pub use error::{SessionError, StatsError, TutorialError};
pub use stats_service::{StatsEvent, StatsService};
pub use tutorial_service::TutorialService;

pub use games::{
    AnswerFeedback, GameMode, GameSession, LeversSession, MatchingSession, MovementSession, Phase,
    SessionProgress, WhoAmISession,
};
