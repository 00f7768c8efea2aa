use bio_core::model::GameKind;

/// Points for a correctly classified lever.
pub const LEVERS_POINTS: u32 = 10;
/// Points for a correctly analysed movement.
pub const MOVEMENT_POINTS: u32 = 20;
/// Points per pair once a matching set is fully correct.
pub const MATCHING_POINTS_PER_PAIR: u32 = 10;
/// Pairs drawn for one matching round.
pub const MATCHING_DRAW_SIZE: usize = 8;
/// Incorrect guesses allowed before a who-am-i answer is revealed.
pub const WHO_AM_I_MAX_MISSES: u32 = 3;

/// A per-question budget that shrinks with hints and misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayingScore {
    pub start: u32,
    pub hint_cost: u32,
    pub hint_floor: u32,
    pub miss_cost: u32,
    pub miss_floor: u32,
}

impl DecayingScore {
    pub const WHO_AM_I: Self = Self {
        start: 100,
        hint_cost: 15,
        hint_floor: 10,
        miss_cost: 10,
        miss_floor: 0,
    };

    /// Budget after revealing one more hint. The floor applies even when the
    /// budget was already below it.
    #[must_use]
    pub fn after_hint(self, current: u32) -> u32 {
        current.saturating_sub(self.hint_cost).max(self.hint_floor)
    }

    #[must_use]
    pub fn after_miss(self, current: u32) -> u32 {
        current.saturating_sub(self.miss_cost).max(self.miss_floor)
    }
}

/// How a correct answer is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRule {
    /// Flat amount per correct question.
    Fixed(u32),
    /// Whatever is left of the per-question budget.
    Decaying(DecayingScore),
    /// Amount per pair, paid only when every pair is right.
    PerPair(u32),
}

/// What happens after an incorrect answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// The first answer is final.
    SingleAttempt,
    /// Retry until `max_misses` incorrect answers, then reveal.
    Limited { max_misses: u32 },
    /// Retry as often as wanted; a miss is never final.
    Unlimited,
}

/// How options are ordered when a round is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionShuffle {
    /// Bank order.
    None,
    /// Each question's option list is shuffled.
    PerQuestion,
    /// The right-hand column is shuffled apart from the left; can be reshuffled mid-round.
    RightColumn,
}

/// The knobs that make one mini-game differ from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePolicy {
    pub game: GameKind,
    pub score: ScoreRule,
    pub retry: RetryPolicy,
    pub shuffle: OptionShuffle,
}

impl GamePolicy {
    #[must_use]
    pub fn levers() -> Self {
        Self {
            game: GameKind::Levers,
            score: ScoreRule::Fixed(LEVERS_POINTS),
            retry: RetryPolicy::SingleAttempt,
            shuffle: OptionShuffle::None,
        }
    }

    #[must_use]
    pub fn who_am_i() -> Self {
        Self {
            game: GameKind::WhoAmI,
            score: ScoreRule::Decaying(DecayingScore::WHO_AM_I),
            retry: RetryPolicy::Limited {
                max_misses: WHO_AM_I_MAX_MISSES,
            },
            shuffle: OptionShuffle::None,
        }
    }

    #[must_use]
    pub fn movement() -> Self {
        Self {
            game: GameKind::Movement,
            score: ScoreRule::Fixed(MOVEMENT_POINTS),
            retry: RetryPolicy::SingleAttempt,
            shuffle: OptionShuffle::PerQuestion,
        }
    }

    #[must_use]
    pub fn matching() -> Self {
        Self {
            game: GameKind::Matching,
            score: ScoreRule::PerPair(MATCHING_POINTS_PER_PAIR),
            retry: RetryPolicy::Unlimited,
            shuffle: OptionShuffle::RightColumn,
        }
    }

    /// Starting per-question budget, if this game uses one.
    #[must_use]
    pub fn initial_question_score(&self) -> u32 {
        match self.score {
            ScoreRule::Decaying(rule) => rule.start,
            ScoreRule::Fixed(points) => points,
            ScoreRule::PerPair(_) => 0,
        }
    }

    /// Whether `misses` incorrect answers end the question.
    #[must_use]
    pub fn miss_is_final(&self, misses: u32) -> bool {
        match self.retry {
            RetryPolicy::SingleAttempt => true,
            RetryPolicy::Limited { max_misses } => misses >= max_misses,
            RetryPolicy::Unlimited => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_cost_respects_floor() {
        let rule = DecayingScore::WHO_AM_I;
        assert_eq!(rule.after_hint(100), 85);
        assert_eq!(rule.after_hint(20), 10);
        assert_eq!(rule.after_hint(0), 10);
    }

    #[test]
    fn miss_cost_stops_at_zero() {
        let rule = DecayingScore::WHO_AM_I;
        assert_eq!(rule.after_miss(85), 75);
        assert_eq!(rule.after_miss(5), 0);
    }

    #[test]
    fn retry_policies_decide_finality() {
        assert!(GamePolicy::levers().miss_is_final(1));
        assert!(!GamePolicy::who_am_i().miss_is_final(2));
        assert!(GamePolicy::who_am_i().miss_is_final(3));
        assert!(!GamePolicy::matching().miss_is_final(50));
    }
}
