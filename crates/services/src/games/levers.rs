use bio_core::Shuffler;
use bio_core::model::{Difficulty, LeverClass, LeverQuestion, QuestionBank};

use crate::error::SessionError;

use super::policy::GamePolicy;
use super::round::{Check, Round};
use super::session::{GameMode, GameSession};

/// Classify everyday objects and body movements as 1st, 2nd or 3rd class levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levers;

pub type LeversSession = GameSession<Levers>;

impl GameMode for Levers {
    type Config = Difficulty;
    type Round = LeverRound;

    fn policy() -> GamePolicy {
        GamePolicy::levers()
    }

    fn build_rounds(
        bank: &QuestionBank,
        difficulty: &Difficulty,
        _shuffler: &mut Shuffler,
    ) -> Vec<LeverRound> {
        bank.levers(*difficulty)
            .iter()
            .cloned()
            .map(LeverRound::new)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeverRound {
    question: LeverQuestion,
}

impl LeverRound {
    #[must_use]
    pub fn new(question: LeverQuestion) -> Self {
        Self { question }
    }

    #[must_use]
    pub fn question(&self) -> &LeverQuestion {
        &self.question
    }

    /// The three classes, always in order.
    #[must_use]
    pub fn choices(&self) -> [LeverClass; 3] {
        LeverClass::ALL
    }
}

impl Round for LeverRound {
    type Answer = LeverClass;

    fn check(&self, answer: &LeverClass) -> Result<Check, SessionError> {
        Ok(Check::single(*answer == self.question.class))
    }

    fn describe(&self, answer: &LeverClass) -> String {
        answer.label().to_owned()
    }

    fn solution(&self) -> String {
        match &self.question.explanation {
            Some(explanation) => format!("{}. {explanation}", self.question.answer),
            None => self.question.answer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::SessionError;
    use crate::games::Phase;
    use crate::stats_service::StatsService;
    use bio_core::Clock;
    use bio_core::model::GameKind;
    use storage::InMemoryStore;

    fn session() -> (LeversSession, StatsService) {
        let bank = Arc::new(QuestionBank::bundled().unwrap());
        let session = LeversSession::new(bank, Shuffler::Identity, Clock::fixed_now()).unwrap();
        let stats = StatsService::load(Arc::new(InMemoryStore::new())).unwrap();
        (session, stats)
    }

    #[test]
    fn waits_for_difficulty() {
        let (mut session, mut stats) = session();
        assert_eq!(session.phase(), Phase::SelectingConfiguration);
        assert!(matches!(
            session.submit(&LeverClass::First, &mut stats),
            Err(SessionError::NotConfigured)
        ));

        session.configure(Difficulty::Medium).unwrap();
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.rounds().len(), 12);
        assert!(matches!(
            session.configure(Difficulty::Hard),
            Err(SessionError::AlreadyConfigured)
        ));
    }

    #[test]
    fn correct_class_awards_ten_and_wrong_resets_streak() {
        let (mut session, mut stats) = session();
        session.configure(Difficulty::Easy).unwrap();

        let class = session.current_round().unwrap().question().class;
        let feedback = session.submit(&class, &mut stats).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.awarded, 10);
        assert_eq!(stats.stats().game_score(GameKind::Levers), 10);
        assert_eq!(stats.stats().current_streak(), 1);

        // single attempt: the round is closed
        assert!(matches!(
            session.submit(&class, &mut stats),
            Err(SessionError::InvalidPhase { .. })
        ));

        session.next().unwrap();
        let right = session.current_round().unwrap().question().class;
        let wrong = LeverClass::ALL.into_iter().find(|c| *c != right).unwrap();
        let feedback = session.submit(&wrong, &mut stats).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.awarded, 0);
        assert!(feedback.solution.is_some());
        assert_eq!(stats.stats().current_streak(), 0);
        assert_eq!(stats.stats().best_streak(), 1);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn reset_returns_to_difficulty_selection() {
        let (mut session, _stats) = session();
        session.configure(Difficulty::Hard).unwrap();
        assert_eq!(session.reset().unwrap(), Phase::SelectingConfiguration);
        assert!(session.current_round().is_none());
        assert!(session.config().is_none());
    }

    #[test]
    fn hints_and_reshuffle_are_rejected() {
        let (mut session, _stats) = session();
        session.configure(Difficulty::Easy).unwrap();
        assert!(matches!(
            session.reveal_hint(),
            Err(SessionError::HintsUnsupported)
        ));
        assert!(matches!(
            session.reshuffle(),
            Err(SessionError::ReshuffleUnsupported)
        ));
    }
}
