mod bank;
mod game;
mod ids;
mod question;
mod stats;
mod summary;

pub use bank::{BankAudit, BankError, Duplicate, LeverTiers, QuestionBank};
pub use game::{Difficulty, GameKind, ParseGameError};
pub use ids::QuestionId;
pub use question::{
    BodyPartCategory, LeverClass, LeverQuestion, MatchingCategory, MatchingPair, MovementOption,
    MovementQuestion, QuestionError, WhoAmIQuestion,
};
pub use stats::{PlayerStats, PlayerStatsDraft, XP_PER_LEVEL, level_for_xp};
pub use summary::{GameSummary, GameSummaryError};
