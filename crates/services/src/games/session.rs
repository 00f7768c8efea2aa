use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use bio_core::model::{GameKind, GameSummary, QuestionBank};
use bio_core::{Clock, Shuffler};

use crate::error::SessionError;
use crate::stats_service::{StatsEvent, StatsService};

use super::policy::{GamePolicy, OptionShuffle, RetryPolicy, ScoreRule};
use super::progress::{AnswerFeedback, Phase, QuestionProgress, Resolution, SessionProgress};
use super::round::Round;

//
// ─── GAME MODE ─────────────────────────────────────────────────────────────────
//

/// What a mini-game plugs into the shared session controller.
pub trait GameMode {
    /// Selection made before playing (difficulty, category). `()` when the
    /// game starts straight away.
    type Config: Clone + fmt::Debug;
    type Round: Round + fmt::Debug;

    fn policy() -> GamePolicy;

    /// Configuration applied on creation and on reset. `None` means the
    /// player has to pick one.
    fn default_config() -> Option<Self::Config> {
        None
    }

    /// Prepare the rounds for one play-through.
    fn build_rounds(
        bank: &QuestionBank,
        config: &Self::Config,
        shuffler: &mut Shuffler,
    ) -> Vec<Self::Round>;
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a mini-game.
///
/// Steps through `SelectingConfiguration → Answering → ShowingFeedback →
/// (Answering | Completed)`. Scoring events go to the [`StatsService`] passed
/// into [`GameSession::submit`]; the session itself only keeps the running
/// score of this play-through.
pub struct GameSession<M: GameMode> {
    bank: Arc<QuestionBank>,
    policy: GamePolicy,
    shuffler: Shuffler,
    clock: Clock,
    config: Option<M::Config>,
    rounds: Vec<M::Round>,
    current: usize,
    phase: Phase,
    question: QuestionProgress,
    score: u32,
    correct: u32,
    incorrect: u32,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl<M: GameMode> GameSession<M> {
    /// Create a session. Games without a configuration step start answering
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the default configuration yields no rounds.
    pub fn new(
        bank: Arc<QuestionBank>,
        shuffler: Shuffler,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        let policy = M::policy();
        let mut session = Self {
            bank,
            policy,
            shuffler,
            clock,
            config: None,
            rounds: Vec::new(),
            current: 0,
            phase: Phase::SelectingConfiguration,
            question: QuestionProgress::fresh(&policy, 0),
            score: 0,
            correct: 0,
            incorrect: 0,
            started_at: None,
            completed_at: None,
        };
        if let Some(config) = M::default_config() {
            session.start(config)?;
        }
        Ok(session)
    }

    /// Pick the subset of the bank to play and start at the first round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyConfigured` outside the selection phase and
    /// `SessionError::Empty` if the selection has no questions.
    pub fn configure(&mut self, config: M::Config) -> Result<Phase, SessionError> {
        if self.phase != Phase::SelectingConfiguration {
            return Err(SessionError::AlreadyConfigured);
        }
        self.start(config)
    }

    /// Reveal the next hint, lowering what a correct answer pays.
    ///
    /// Returns the number of hints now visible.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::HintsUnsupported` for games without hints,
    /// `SessionError::HintsExhausted` when every hint is shown, and a phase
    /// error when no round is open.
    pub fn reveal_hint(&mut self) -> Result<usize, SessionError> {
        let ScoreRule::Decaying(rule) = self.policy.score else {
            return Err(SessionError::HintsUnsupported);
        };
        self.ensure_open("reveal a hint")?;
        let available = self
            .rounds
            .get(self.current)
            .map_or(0, |round| round.hint_count());
        if self.question.revealed_hints() >= available {
            return Err(SessionError::HintsExhausted);
        }
        let next_score = rule.after_hint(self.question.question_score());
        self.question.reveal_hint(next_score);
        self.phase = Phase::Answering;
        Ok(self.question.revealed_hints())
    }

    /// Grade an answer for the current round and record its effect on the stats.
    ///
    /// Submitting from a feedback screen whose round is still open counts as a
    /// retry. Stats are written before the session moves on, so a storage
    /// failure leaves the session exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidAnswer` for answers that do not fit the
    /// round, a phase error when no round is open, and `SessionError::Stats`
    /// when the stats cannot be saved.
    pub fn submit(
        &mut self,
        answer: &<M::Round as Round>::Answer,
        stats: &mut StatsService,
    ) -> Result<AnswerFeedback, SessionError> {
        self.ensure_open("submit")?;
        let game = self.policy.game;
        let round = self
            .rounds
            .get(self.current)
            .ok_or(SessionError::Completed)?;
        let check = round.check(answer)?;
        let given = round.describe(answer);
        let correct = check.is_correct();

        let mut misses = self.question.attempts();
        let mut question_score = self.question.question_score();
        let mut awarded = 0;
        let mut events = Vec::new();

        let resolution = if correct {
            awarded = match self.policy.score {
                ScoreRule::Fixed(points) => points,
                ScoreRule::Decaying(_) => question_score,
                ScoreRule::PerPair(points) => points.saturating_mul(check.total()),
            };
            events.push(StatsEvent::AddScore {
                points: awarded,
                game,
            });
            events.push(StatsEvent::IncrementStreak);
            Some(Resolution::Correct)
        } else {
            misses += 1;
            if let ScoreRule::Decaying(rule) = self.policy.score {
                question_score = rule.after_miss(question_score);
            }
            if self.policy.miss_is_final(misses) {
                events.push(StatsEvent::ResetStreak);
                Some(Resolution::Incorrect)
            } else {
                None
            }
        };

        let feedback = AnswerFeedback {
            given,
            correct,
            matched: check.matched(),
            total: check.total(),
            marks: check.marks,
            awarded,
            resolution,
            attempts: self.question.submissions() + 1,
            solution: resolution.map(|_| round.solution()),
        };

        if !events.is_empty() {
            stats.apply(&events)?;
        }

        match resolution {
            Some(Resolution::Correct) => self.correct += 1,
            Some(Resolution::Incorrect) => self.incorrect += 1,
            None => {}
        }
        self.score = self.score.saturating_add(awarded);
        self.question
            .record(feedback.clone(), misses, question_score);
        self.phase = Phase::ShowingFeedback;
        tracing::debug!(
            %game,
            index = self.current,
            correct,
            matched = feedback.matched,
            awarded,
            "answer checked"
        );
        Ok(feedback)
    }

    /// Leave the feedback screen to answer the same round again.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the feedback belongs to a round that is
    /// still open.
    pub fn retry(&mut self) -> Result<Phase, SessionError> {
        match self.phase {
            Phase::ShowingFeedback if !self.question.is_resolved() => {
                self.phase = Phase::Answering;
                Ok(self.phase)
            }
            Phase::SelectingConfiguration => Err(SessionError::NotConfigured),
            Phase::Completed => Err(SessionError::Completed),
            phase => Err(SessionError::InvalidPhase {
                action: "retry",
                phase,
            }),
        }
    }

    /// Shuffle the presented options of the current round again and clear the
    /// last check.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ReshuffleUnsupported` for games with a fixed
    /// option order and a phase error once the round is resolved.
    pub fn reshuffle(&mut self) -> Result<(), SessionError> {
        if self.policy.shuffle != OptionShuffle::RightColumn {
            return Err(SessionError::ReshuffleUnsupported);
        }
        self.ensure_open("reshuffle")?;
        let round = self
            .rounds
            .get_mut(self.current)
            .ok_or(SessionError::Completed)?;
        if !round.reshuffle(&mut self.shuffler) {
            return Err(SessionError::ReshuffleUnsupported);
        }
        self.question.clear_feedback();
        self.phase = Phase::Answering;
        Ok(())
    }

    /// Advance to the next round, or to `Completed` after the last one.
    ///
    /// A round must be resolved first, except in games with unlimited retries
    /// where any checked round may be left.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unresolved` if the round cannot be left yet.
    pub fn next(&mut self) -> Result<Phase, SessionError> {
        match self.phase {
            Phase::SelectingConfiguration => return Err(SessionError::NotConfigured),
            Phase::Completed => return Err(SessionError::Completed),
            Phase::Answering | Phase::ShowingFeedback => {}
        }
        let may_leave = self.question.is_resolved()
            || (self.policy.retry == RetryPolicy::Unlimited && self.question.submissions() > 0);
        if !may_leave {
            return Err(SessionError::Unresolved);
        }

        self.current += 1;
        if self.current >= self.rounds.len() {
            self.current = self.rounds.len();
            self.question = QuestionProgress::fresh(&self.policy, 0);
            self.completed_at = Some(self.clock.now());
            self.phase = Phase::Completed;
            tracing::info!(
                game = %self.policy.game,
                score = self.score,
                correct = self.correct,
                incorrect = self.incorrect,
                "game session completed"
            );
        } else {
            self.question = self.fresh_question();
            self.phase = Phase::Answering;
        }
        Ok(self.phase)
    }

    /// Drop the play-through. Games with a configuration step go back to
    /// selection; the others restart at the first round with the score zeroed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if a restart yields no rounds.
    pub fn reset(&mut self) -> Result<Phase, SessionError> {
        if let Some(config) = M::default_config() {
            return self.start(config);
        }
        self.config = None;
        self.rounds.clear();
        self.current = 0;
        self.score = 0;
        self.correct = 0;
        self.incorrect = 0;
        self.started_at = None;
        self.completed_at = None;
        self.question = QuestionProgress::fresh(&self.policy, 0);
        self.phase = Phase::SelectingConfiguration;
        Ok(self.phase)
    }

    /// Play the same configuration again with a fresh draw.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfigured` before a configuration is picked.
    pub fn restart(&mut self) -> Result<Phase, SessionError> {
        let config = self.config.clone().ok_or(SessionError::NotConfigured)?;
        self.start(config)
    }

    /// Outcome of a completed play-through.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` before the session is completed.
    pub fn summary(&self) -> Result<GameSummary, SessionError> {
        let (Phase::Completed, Some(started_at), Some(completed_at)) =
            (self.phase, self.started_at, self.completed_at)
        else {
            return Err(SessionError::InvalidPhase {
                action: "summarize",
                phase: self.phase,
            });
        };
        let rounds = u32::try_from(self.rounds.len()).unwrap_or(u32::MAX);
        Ok(GameSummary::new(
            self.policy.game,
            rounds,
            self.correct,
            self.incorrect,
            self.score,
            started_at,
            completed_at,
        )?)
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn game(&self) -> GameKind {
        self.policy.game
    }

    #[must_use]
    pub fn policy(&self) -> &GamePolicy {
        &self.policy
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> Option<&M::Config> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// The round being played, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&M::Round> {
        match self.phase {
            Phase::Answering | Phase::ShowingFeedback => self.rounds.get(self.current),
            Phase::SelectingConfiguration | Phase::Completed => None,
        }
    }

    #[must_use]
    pub fn rounds(&self) -> &[M::Round] {
        &self.rounds
    }

    #[must_use]
    pub fn question(&self) -> &QuestionProgress {
        &self.question
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.question.feedback()
    }

    /// Points earned in this play-through.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            index: self.current,
            total: self.rounds.len(),
            correct: self.correct,
            incorrect: self.incorrect,
            score: self.score,
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn start(&mut self, config: M::Config) -> Result<Phase, SessionError> {
        let rounds = M::build_rounds(&self.bank, &config, &mut self.shuffler);
        if rounds.is_empty() {
            return Err(SessionError::Empty);
        }
        tracing::info!(
            game = %self.policy.game,
            ?config,
            rounds = rounds.len(),
            "game session started"
        );
        self.rounds = rounds;
        self.config = Some(config);
        self.current = 0;
        self.score = 0;
        self.correct = 0;
        self.incorrect = 0;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.question = self.fresh_question();
        self.phase = Phase::Answering;
        Ok(self.phase)
    }

    fn fresh_question(&self) -> QuestionProgress {
        let hints = self
            .rounds
            .get(self.current)
            .map_or(0, |round| round.hint_count());
        QuestionProgress::fresh(&self.policy, hints)
    }

    /// Actions on the current round are allowed while answering, and from a
    /// feedback screen whose round is still open.
    fn ensure_open(&self, action: &'static str) -> Result<(), SessionError> {
        match self.phase {
            Phase::Answering => Ok(()),
            Phase::ShowingFeedback if !self.question.is_resolved() => Ok(()),
            Phase::SelectingConfiguration => Err(SessionError::NotConfigured),
            Phase::Completed => Err(SessionError::Completed),
            phase @ Phase::ShowingFeedback => Err(SessionError::InvalidPhase { action, phase }),
        }
    }
}

impl<M: GameMode> fmt::Debug for GameSession<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("game", &self.policy.game)
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("current", &self.current)
            .field("rounds", &self.rounds.len())
            .field("question", &self.question)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}
