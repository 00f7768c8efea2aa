use std::sync::Arc;

use bio_core::model::{GameKind, PlayerStats};
use storage::{StatsRepository, StorageError};

use crate::error::StatsError;

/// One mutation of the player stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsEvent {
    AddScore { points: u32, game: GameKind },
    IncrementStreak,
    ResetStreak,
    AddXp(u32),
    ResetGame(GameKind),
}

impl StatsEvent {
    fn apply_to(self, stats: &mut PlayerStats) {
        match self {
            StatsEvent::AddScore { points, game } => stats.add_score(points, game),
            StatsEvent::IncrementStreak => stats.increment_streak(),
            StatsEvent::ResetStreak => stats.reset_streak(),
            StatsEvent::AddXp(xp) => stats.add_xp(xp),
            StatsEvent::ResetGame(game) => stats.reset_game(game),
        }
    }
}

/// Process-wide player stats, persisted after every mutation.
///
/// Each operation is applied to a copy, the copy is saved, and only then does
/// it replace the in-memory state. A failed save leaves both the snapshot and
/// the in-memory stats at their previous value.
pub struct StatsService {
    stats: PlayerStats,
    repo: Arc<dyn StatsRepository>,
}

impl StatsService {
    /// Load stats from the repository.
    ///
    /// A missing or malformed snapshot starts from zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the backend itself cannot be read.
    pub fn load(repo: Arc<dyn StatsRepository>) -> Result<Self, StatsError> {
        let stats = match repo.load_stats() {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                tracing::info!("no stats snapshot found, starting fresh");
                PlayerStats::default()
            }
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(%reason, "stats snapshot is malformed, starting fresh");
                PlayerStats::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { stats, repo })
    }

    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved.
    pub fn add_score(&mut self, points: u32, game: GameKind) -> Result<&PlayerStats, StatsError> {
        self.apply(&[StatsEvent::AddScore { points, game }])
    }

    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved.
    pub fn increment_streak(&mut self) -> Result<&PlayerStats, StatsError> {
        self.apply(&[StatsEvent::IncrementStreak])
    }

    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved.
    pub fn reset_streak(&mut self) -> Result<&PlayerStats, StatsError> {
        self.apply(&[StatsEvent::ResetStreak])
    }

    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved.
    pub fn add_xp(&mut self, xp: u32) -> Result<&PlayerStats, StatsError> {
        self.apply(&[StatsEvent::AddXp(xp)])
    }

    /// Zero `game`'s score. The total score is left as is.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved.
    pub fn reset_game(&mut self, game: GameKind) -> Result<&PlayerStats, StatsError> {
        self.apply(&[StatsEvent::ResetGame(game)])
    }

    /// Apply several events as one unit with a single save.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the snapshot cannot be saved; no event
    /// is applied in that case.
    pub fn apply(&mut self, events: &[StatsEvent]) -> Result<&PlayerStats, StatsError> {
        let mut next = self.stats.clone();
        for event in events {
            event.apply_to(&mut next);
        }
        self.repo.save_stats(&next)?;
        tracing::debug!(
            ?events,
            total_score = next.total_score(),
            streak = next.current_streak(),
            "stats updated"
        );
        self.stats = next;
        Ok(&self.stats)
    }
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
