//! The four mini-games, driven by one shared session controller.
//!
//! Each game supplies a [`GameMode`]: its [`GamePolicy`], its configuration
//! type and the [`Round`] it presents. [`GameSession`] owns the flow and the
//! coupling to the player stats.

mod levers;
mod matching;
mod movement;
mod policy;
mod progress;
mod round;
mod session;
mod whoami;

pub use levers::{LeverRound, Levers, LeversSession};
pub use matching::{Matching, MatchingRound, MatchingSession};
pub use movement::{Movement, MovementRound, MovementSession};
pub use policy::{
    DecayingScore, GamePolicy, LEVERS_POINTS, MATCHING_DRAW_SIZE, MATCHING_POINTS_PER_PAIR,
    MOVEMENT_POINTS, OptionShuffle, RetryPolicy, ScoreRule, WHO_AM_I_MAX_MISSES,
};
pub use progress::{AnswerFeedback, Phase, QuestionProgress, Resolution, SessionProgress};
pub use round::{Check, Round};
pub use session::{GameMode, GameSession};
pub use whoami::{WhoAmI, WhoAmIRound, WhoAmISession};
