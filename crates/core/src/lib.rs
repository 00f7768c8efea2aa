#![forbid(unsafe_code)]

//! Domain model for the Biodinâmica quiz: question bank, player stats,
//! answer matching and the small injectable environment (clock, shuffler).

pub mod error;
pub mod model;
pub mod shuffle;
pub mod text;
pub mod time;

pub use error::Error;
pub use shuffle::Shuffler;
pub use text::{is_valid_answer, normalize};
pub use time::Clock;
