use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGameError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── GAME KIND ─────────────────────────────────────────────────────────────────
//

/// The four mini-games. Closed set: every per-game lookup is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Levers,
    #[serde(rename = "whoami")]
    WhoAmI,
    Movement,
    Matching,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Levers,
        GameKind::WhoAmI,
        GameKind::Movement,
        GameKind::Matching,
    ];

    /// Short identifier used on the command line and in storage keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Levers => "levers",
            GameKind::WhoAmI => "whoami",
            GameKind::Movement => "movement",
            GameKind::Matching => "matching",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameKind::Levers => "Quebra-cabeça das Alavancas",
            GameKind::WhoAmI => "Quem Sou Eu?",
            GameKind::Movement => "Movimento em Ação",
            GameKind::Matching => "Conecte os Conceitos",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "levers" => Ok(GameKind::Levers),
            "whoami" | "who-am-i" => Ok(GameKind::WhoAmI),
            "movement" => Ok(GameKind::Movement),
            "matching" => Ok(GameKind::Matching),
            other => Err(ParseGameError::UnknownGame(other.to_owned())),
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Lever question tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Médio",
            Difficulty::Hard => "Difícil",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseGameError::UnknownDifficulty(other.to_owned())),
        }
    }
}
