use bio_core::model::{GameKind, PlayerStats, PlayerStatsDraft};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::file::FileStore;

/// Key holding the player stats snapshot.
pub const STATS_KEY: &str = "biodinamica-game-storage";

/// Snapshot format version written alongside the state.
pub const STATS_SNAPSHOT_VERSION: u32 = 0;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── KEY-VALUE BACKEND ─────────────────────────────────────────────────────────
//

/// Flat string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or replace a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory backend for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

//
// ─── STATS SNAPSHOT ────────────────────────────────────────────────────────────
//

/// Persisted shape of `PlayerStats`.
///
/// Keys are the snapshot's camelCase names. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub total_score: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub level: u32,
    pub levers_score: u32,
    pub who_am_i_score: u32,
    pub movement_score: u32,
    pub matching_score: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl Default for StatsRecord {
    fn default() -> Self {
        Self::from_stats(&PlayerStats::default())
    }
}

impl StatsRecord {
    #[must_use]
    pub fn from_stats(stats: &PlayerStats) -> Self {
        Self {
            total_score: stats.total_score(),
            total_xp: stats.total_xp(),
            level: stats.level(),
            levers_score: stats.game_score(GameKind::Levers),
            who_am_i_score: stats.game_score(GameKind::WhoAmI),
            movement_score: stats.game_score(GameKind::Movement),
            matching_score: stats.game_score(GameKind::Matching),
            current_streak: stats.current_streak(),
            best_streak: stats.best_streak(),
        }
    }

    /// Convert back into domain stats. The stored level is ignored and
    /// re-derived from XP.
    #[must_use]
    pub fn into_stats(self) -> PlayerStats {
        PlayerStats::from_persisted(PlayerStatsDraft {
            total_score: self.total_score,
            total_xp: self.total_xp,
            levers_score: self.levers_score,
            who_am_i_score: self.who_am_i_score,
            movement_score: self.movement_score,
            matching_score: self.matching_score,
            current_streak: self.current_streak,
            best_streak: self.best_streak,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StatsSnapshot {
    state: StatsRecord,
    #[serde(default)]
    version: u32,
}

/// Repository contract for the player stats snapshot.
pub trait StatsRepository: Send + Sync {
    /// Load the last saved stats.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the snapshot is malformed, or
    /// other storage errors. No snapshot is `Ok(None)`.
    fn load_stats(&self) -> Result<Option<PlayerStats>, StorageError>;

    /// Replace the snapshot with `stats`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    fn save_stats(&self, stats: &PlayerStats) -> Result<(), StorageError>;
}

impl<T: KeyValueStore> StatsRepository for T {
    fn load_stats(&self) -> Result<Option<PlayerStats>, StorageError> {
        let Some(raw) = self.get(STATS_KEY)? else {
            return Ok(None);
        };
        let snapshot: StatsSnapshot = serde_json::from_str(&raw)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(snapshot.state.into_stats()))
    }

    fn save_stats(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        let snapshot = StatsSnapshot {
            state: StatsRecord::from_stats(stats),
            version: STATS_SNAPSHOT_VERSION,
        };
        let raw = serde_json::to_string(&snapshot)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.set(STATS_KEY, &raw)?;
        tracing::debug!(key = STATS_KEY, bytes = raw.len(), "stats snapshot saved");
        Ok(())
    }
}

//
// ─── TUTORIAL FLAGS ────────────────────────────────────────────────────────────
//

/// Storage key of the "don't show the tutorial again" flag for `game`.
#[must_use]
pub fn tutorial_key(game: GameKind) -> &'static str {
    match game {
        GameKind::Levers => "levers-tutorial-hidden",
        GameKind::WhoAmI => "whoami-tutorial-hidden",
        GameKind::Movement => "movement-tutorial-hidden",
        GameKind::Matching => "matching-tutorial-hidden",
    }
}

/// Per-game onboarding flags. Not part of the scored state.
pub trait TutorialFlagRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be read.
    fn tutorial_hidden(&self, game: GameKind) -> Result<bool, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be written.
    fn set_tutorial_hidden(&self, game: GameKind, hidden: bool) -> Result<(), StorageError>;
}

impl<T: KeyValueStore> TutorialFlagRepository for T {
    fn tutorial_hidden(&self, game: GameKind) -> Result<bool, StorageError> {
        // any non-empty value counts as hidden
        Ok(self
            .get(tutorial_key(game))?
            .is_some_and(|value| !value.is_empty()))
    }

    fn set_tutorial_hidden(&self, game: GameKind, hidden: bool) -> Result<(), StorageError> {
        if hidden {
            self.set(tutorial_key(game), "true")
        } else {
            self.remove(tutorial_key(game))
        }
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsRepository>,
    pub tutorials: Arc<dyn TutorialFlagRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    /// Open a directory-backed store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn file(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::from_store(FileStore::open(dir)?))
    }

    #[must_use]
    pub fn from_store<S: KeyValueStore + Clone + 'static>(store: S) -> Self {
        let stats: Arc<dyn StatsRepository> = Arc::new(store.clone());
        let tutorials: Arc<dyn TutorialFlagRepository> = Arc::new(store);
        Self { stats, tutorials }
    }
}
