pub mod bank;
pub mod play;
pub mod stats;
