use crate::model::game::GameKind;

/// XP needed to climb one level.
pub const XP_PER_LEVEL: u32 = 100;

/// Level reached with `total_xp` experience points; starts at 1.
#[must_use]
pub fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// Cumulative player progress across every mini-game.
///
/// Invariants held by every constructor and mutator:
/// - `level == total_xp / 100 + 1`
/// - `best_streak >= current_streak`, and `best_streak` never decreases
///
/// `total_score` is the sum of everything ever scored; it is not kept equal to
/// the sum of the per-game scores, because [`PlayerStats::reset_game`] only
/// clears the game's own counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    total_score: u32,
    total_xp: u32,
    level: u32,
    levers_score: u32,
    who_am_i_score: u32,
    movement_score: u32,
    matching_score: u32,
    current_streak: u32,
    best_streak: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_score: 0,
            total_xp: 0,
            level: 1,
            levers_score: 0,
            who_am_i_score: 0,
            movement_score: 0,
            matching_score: 0,
            current_streak: 0,
            best_streak: 0,
        }
    }
}

/// Raw persisted values, before invariants are re-established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStatsDraft {
    pub total_score: u32,
    pub total_xp: u32,
    pub levers_score: u32,
    pub who_am_i_score: u32,
    pub movement_score: u32,
    pub matching_score: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl PlayerStats {
    /// Rehydrate stats from a snapshot.
    ///
    /// The level is derived from XP and the best streak is lifted to at least
    /// the current streak, so a hand-edited snapshot cannot break invariants.
    #[must_use]
    pub fn from_persisted(draft: PlayerStatsDraft) -> Self {
        Self {
            total_score: draft.total_score,
            total_xp: draft.total_xp,
            level: level_for_xp(draft.total_xp),
            levers_score: draft.levers_score,
            who_am_i_score: draft.who_am_i_score,
            movement_score: draft.movement_score,
            matching_score: draft.matching_score,
            current_streak: draft.current_streak,
            best_streak: draft.best_streak.max(draft.current_streak),
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> PlayerStatsDraft {
        PlayerStatsDraft {
            total_score: self.total_score,
            total_xp: self.total_xp,
            levers_score: self.levers_score,
            who_am_i_score: self.who_am_i_score,
            movement_score: self.movement_score,
            matching_score: self.matching_score,
            current_streak: self.current_streak,
            best_streak: self.best_streak,
        }
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Adds `points` to the running total and to `game`'s own score.
    pub fn add_score(&mut self, points: u32, game: GameKind) {
        self.total_score = self.total_score.saturating_add(points);
        let field = self.game_score_mut(game);
        *field = field.saturating_add(points);
    }

    pub fn increment_streak(&mut self) {
        self.current_streak = self.current_streak.saturating_add(1);
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    pub fn reset_streak(&mut self) {
        self.current_streak = 0;
    }

    pub fn add_xp(&mut self, xp: u32) {
        self.total_xp = self.total_xp.saturating_add(xp);
        self.level = level_for_xp(self.total_xp);
    }

    /// Clears `game`'s score. `total_score` keeps what was already earned.
    pub fn reset_game(&mut self, game: GameKind) {
        *self.game_score_mut(game) = 0;
    }

    fn game_score_mut(&mut self, game: GameKind) -> &mut u32 {
        match game {
            GameKind::Levers => &mut self.levers_score,
            GameKind::WhoAmI => &mut self.who_am_i_score,
            GameKind::Movement => &mut self.movement_score,
            GameKind::Matching => &mut self.matching_score,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn game_score(&self, game: GameKind) -> u32 {
        match game {
            GameKind::Levers => self.levers_score,
            GameKind::WhoAmI => self.who_am_i_score,
            GameKind::Movement => self.movement_score,
            GameKind::Matching => self.matching_score,
        }
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }
}
