use bio_core::model::{QuestionBank, WhoAmIQuestion};
use bio_core::{Shuffler, is_valid_answer};

use crate::error::SessionError;

use super::policy::GamePolicy;
use super::round::{Check, Round};
use super::session::{GameMode, GameSession};

/// Guess the joint, muscle or bone from progressively revealed hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhoAmI;

pub type WhoAmISession = GameSession<WhoAmI>;

impl GameMode for WhoAmI {
    type Config = ();
    type Round = WhoAmIRound;

    fn policy() -> GamePolicy {
        GamePolicy::who_am_i()
    }

    fn default_config() -> Option<()> {
        Some(())
    }

    fn build_rounds(bank: &QuestionBank, _config: &(), _shuffler: &mut Shuffler) -> Vec<WhoAmIRound> {
        bank.who_am_i()
            .iter()
            .cloned()
            .map(|question| WhoAmIRound { question })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoAmIRound {
    question: WhoAmIQuestion,
}

impl WhoAmIRound {
    #[must_use]
    pub fn question(&self) -> &WhoAmIQuestion {
        &self.question
    }
}

impl Round for WhoAmIRound {
    type Answer = str;

    fn check(&self, guess: &str) -> Result<Check, SessionError> {
        if guess.trim().is_empty() {
            return Err(SessionError::InvalidAnswer("guess is empty".into()));
        }
        Ok(Check::single(is_valid_answer(guess, &self.question.answer)))
    }

    fn describe(&self, guess: &str) -> String {
        guess.trim().to_owned()
    }

    fn solution(&self) -> String {
        self.question.answer.clone()
    }

    fn hint_count(&self) -> usize {
        self.question.hints.len()
    }
}

impl GameSession<WhoAmI> {
    /// Hints the player can currently see, in bank order.
    #[must_use]
    pub fn visible_hints(&self) -> &[String] {
        let Some(round) = self.current_round() else {
            return &[];
        };
        round
            .question
            .hints
            .get(..self.question().revealed_hints())
            .unwrap_or(&round.question.hints)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::games::{Phase, Resolution};
    use crate::stats_service::StatsService;
    use bio_core::Clock;
    use bio_core::model::GameKind;
    use storage::InMemoryStore;

    fn session() -> (WhoAmISession, StatsService) {
        let bank = Arc::new(QuestionBank::bundled().unwrap());
        let session = WhoAmISession::new(bank, Shuffler::Identity, Clock::fixed_now()).unwrap();
        let stats = StatsService::load(Arc::new(InMemoryStore::new())).unwrap();
        (session, stats)
    }

    fn answer(session: &WhoAmISession) -> String {
        session.current_round().unwrap().question().answer.clone()
    }

    #[test]
    fn starts_without_configuration() {
        let (session, _stats) = session();
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.rounds().len(), 15);
        assert_eq!(session.visible_hints().len(), 1);
        assert_eq!(session.question().question_score(), 100);
    }

    #[test]
    fn hint_then_miss_then_hit_awards_remaining_budget() {
        let (mut session, mut stats) = session();

        assert_eq!(session.reveal_hint().unwrap(), 2);
        assert_eq!(session.question().question_score(), 85);
        assert_eq!(session.visible_hints().len(), 2);

        let miss = session.submit("clavícula errada", &mut stats).unwrap();
        assert!(!miss.correct);
        assert!(!miss.is_resolved());
        assert!(miss.solution.is_none());
        assert_eq!(session.question().question_score(), 75);
        assert_eq!(session.question().attempts(), 1);

        let expected = answer(&session);
        let hit = session.submit(&expected, &mut stats).unwrap();
        assert!(hit.correct);
        assert_eq!(hit.awarded, 75);
        assert_eq!(hit.resolution, Some(Resolution::Correct));
        assert_eq!(stats.stats().total_score(), 75);
        assert_eq!(stats.stats().game_score(GameKind::WhoAmI), 75);
        assert_eq!(stats.stats().current_streak(), 1);
    }

    #[test]
    fn three_misses_reveal_answer_and_reset_streak() {
        let (mut session, mut stats) = session();
        stats.increment_streak().unwrap();

        session.submit("xxxx", &mut stats).unwrap();
        assert_eq!(session.retry().unwrap(), Phase::Answering);
        session.submit("yyyy", &mut stats).unwrap();
        assert!(matches!(session.next(), Err(SessionError::Unresolved)));
        assert_eq!(stats.stats().current_streak(), 1);

        let last = session.submit("zzzz", &mut stats).unwrap();
        assert_eq!(last.resolution, Some(Resolution::Incorrect));
        assert_eq!(last.attempts, 3);
        assert_eq!(last.solution.as_deref(), Some(answer(&session).as_str()));
        assert_eq!(last.awarded, 0);
        assert_eq!(session.question().question_score(), 70);
        assert_eq!(stats.stats().current_streak(), 0);
        assert_eq!(stats.stats().best_streak(), 1);
        assert_eq!(stats.stats().total_score(), 0);

        assert!(matches!(
            session.submit("ainda", &mut stats),
            Err(SessionError::InvalidPhase { .. })
        ));
        assert_eq!(session.next().unwrap(), Phase::Answering);
        assert_eq!(session.question().question_score(), 100);
        assert_eq!(session.question().attempts(), 0);
        assert_eq!(session.visible_hints().len(), 1);
    }

    #[test]
    fn hints_run_out_and_floor_at_ten() {
        let (mut session, _stats) = session();
        let total = session.current_round().unwrap().question().hints.len();
        for _ in 1..total {
            session.reveal_hint().unwrap();
        }
        assert!(matches!(
            session.reveal_hint(),
            Err(SessionError::HintsExhausted)
        ));
        assert_eq!(session.visible_hints().len(), total);
        assert_eq!(session.question().question_score(), 10);
    }

    #[test]
    fn empty_guess_is_not_an_attempt() {
        let (mut session, mut stats) = session();
        assert!(matches!(
            session.submit("   ", &mut stats),
            Err(SessionError::InvalidAnswer(_))
        ));
        assert_eq!(session.question().attempts(), 0);
        assert_eq!(session.phase(), Phase::Answering);
    }

    #[test]
    fn guess_matches_regardless_of_case() {
        let (mut session, mut stats) = session();
        let answer = answer(&session).to_uppercase();
        let feedback = session.submit(&answer, &mut stats).unwrap();
        assert!(feedback.correct);
    }

    #[test]
    fn reset_restarts_at_first_question() {
        let (mut session, mut stats) = session();
        let first = answer(&session);
        session.submit(&first, &mut stats).unwrap();
        session.next().unwrap();
        assert_eq!(session.progress().index, 1);

        assert_eq!(session.reset().unwrap(), Phase::Answering);
        assert_eq!(session.progress().index, 0);
        assert_eq!(session.score(), 0);
        assert_eq!(answer(&session), first);
        assert_eq!(stats.stats().total_score(), 100);
    }
}
