use bio_core::Shuffler;
use bio_core::model::{MovementOption, MovementQuestion, QuestionBank};

use crate::error::SessionError;

use super::policy::GamePolicy;
use super::round::{Check, Round};
use super::session::{GameMode, GameSession};

/// Pick the correct analysis of a pictured movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement;

pub type MovementSession = GameSession<Movement>;

impl GameMode for Movement {
    type Config = ();
    type Round = MovementRound;

    fn policy() -> GamePolicy {
        GamePolicy::movement()
    }

    fn default_config() -> Option<()> {
        Some(())
    }

    fn build_rounds(
        bank: &QuestionBank,
        _config: &(),
        shuffler: &mut Shuffler,
    ) -> Vec<MovementRound> {
        bank.movement()
            .iter()
            .map(|question| {
                let mut options = question.options.clone();
                shuffler.shuffle(&mut options);
                MovementRound {
                    question: question.clone(),
                    options,
                }
            })
            .collect()
    }
}

/// A movement question with its options in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRound {
    question: MovementQuestion,
    options: Vec<MovementOption>,
}

impl MovementRound {
    #[must_use]
    pub fn question(&self) -> &MovementQuestion {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[MovementOption] {
        &self.options
    }
}

impl Round for MovementRound {
    /// Index into [`MovementRound::options`].
    type Answer = usize;

    fn check(&self, index: &usize) -> Result<Check, SessionError> {
        let option = self.options.get(*index).ok_or_else(|| {
            SessionError::InvalidAnswer(format!(
                "option {index} out of range ({} options)",
                self.options.len()
            ))
        })?;
        Ok(Check::single(option.correct))
    }

    fn describe(&self, index: &usize) -> String {
        self.options
            .get(*index)
            .map_or_else(|| format!("option {index}"), |option| option.text.clone())
    }

    fn solution(&self) -> String {
        self.options
            .iter()
            .find(|option| option.correct)
            .map(|option| option.text.clone())
            .unwrap_or_default()
    }
}
