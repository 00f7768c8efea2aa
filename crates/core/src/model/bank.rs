use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::model::game::Difficulty;
use crate::model::ids::QuestionId;
use crate::model::question::{
    LeverClass, LeverQuestion, MatchingCategory, MatchingPair, MovementQuestion, WhoAmIQuestion,
};

const BUNDLED_BANK: &str = include_str!("../../data/question_bank.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(String),

    #[error("failed to parse question bank: {0}")]
    Parse(String),

    #[error("{collection} has no questions")]
    EmptyCollection { collection: &'static str },

    #[error("who-am-i question #{index} has an empty answer")]
    EmptyAnswer { index: usize },

    #[error("who-am-i question #{index} has no hints")]
    NoHints { index: usize },

    #[error("movement question {id} needs at least two options, found {found}")]
    TooFewOptions { id: QuestionId, found: usize },

    #[error("movement question {id} must have exactly one correct option, found {found}")]
    CorrectOptionCount { id: QuestionId, found: usize },

    #[error("matching pair {id} has an empty side")]
    EmptyPairSide { id: QuestionId },
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverTiers {
    pub easy: Vec<LeverQuestion>,
    pub medium: Vec<LeverQuestion>,
    pub hard: Vec<LeverQuestion>,
}

/// Read-only question bank shared by every game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    levers: LeverTiers,
    who_am_i: Vec<WhoAmIQuestion>,
    movement: Vec<MovementQuestion>,
    matching: Vec<MatchingPair>,
}

impl QuestionBank {
    /// Build a bank from in-memory collections.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the content fails validation.
    pub fn new(
        levers: LeverTiers,
        who_am_i: Vec<WhoAmIQuestion>,
        movement: Vec<MovementQuestion>,
        matching: Vec<MatchingPair>,
    ) -> Result<Self, BankError> {
        let bank = Self {
            levers,
            who_am_i,
            movement,
            matching,
        };
        bank.validate()?;
        Ok(bank)
    }

    /// The bank compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bundled asset is malformed.
    pub fn bundled() -> Result<Self, BankError> {
        Self::from_json(BUNDLED_BANK)
    }

    /// Parse and validate a JSON bank document.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` for malformed JSON and validation errors otherwise.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let bank: Self =
            serde_json::from_str(json).map_err(|err| BankError::Parse(err.to_string()))?;
        bank.validate()?;
        Ok(bank)
    }

    /// Read a JSON bank from disk.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be read, then as [`QuestionBank::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| BankError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<(), BankError> {
        for difficulty in Difficulty::ALL {
            if self.levers(difficulty).is_empty() {
                return Err(BankError::EmptyCollection {
                    collection: match difficulty {
                        Difficulty::Easy => "levers.easy",
                        Difficulty::Medium => "levers.medium",
                        Difficulty::Hard => "levers.hard",
                    },
                });
            }
        }
        if self.who_am_i.is_empty() {
            return Err(BankError::EmptyCollection {
                collection: "whoAmI",
            });
        }
        if self.movement.is_empty() {
            return Err(BankError::EmptyCollection {
                collection: "movement",
            });
        }
        if self.matching.is_empty() {
            return Err(BankError::EmptyCollection {
                collection: "matching",
            });
        }

        for (index, question) in self.who_am_i.iter().enumerate() {
            if question.answer.trim().is_empty() {
                return Err(BankError::EmptyAnswer { index });
            }
            if question.hints.is_empty() {
                return Err(BankError::NoHints { index });
            }
        }

        for question in &self.movement {
            if question.options.len() < 2 {
                return Err(BankError::TooFewOptions {
                    id: question.id,
                    found: question.options.len(),
                });
            }
            let correct = question.options.iter().filter(|o| o.correct).count();
            if correct != 1 {
                return Err(BankError::CorrectOptionCount {
                    id: question.id,
                    found: correct,
                });
            }
        }

        for pair in &self.matching {
            if pair.left.trim().is_empty() || pair.right.trim().is_empty() {
                return Err(BankError::EmptyPairSide { id: pair.id });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn levers(&self, difficulty: Difficulty) -> &[LeverQuestion] {
        match difficulty {
            Difficulty::Easy => &self.levers.easy,
            Difficulty::Medium => &self.levers.medium,
            Difficulty::Hard => &self.levers.hard,
        }
    }

    #[must_use]
    pub fn lever_count(&self, difficulty: Difficulty) -> usize {
        self.levers(difficulty).len()
    }

    #[must_use]
    pub fn who_am_i(&self) -> &[WhoAmIQuestion] {
        &self.who_am_i
    }

    #[must_use]
    pub fn movement(&self) -> &[MovementQuestion] {
        &self.movement
    }

    #[must_use]
    pub fn matching(&self) -> &[MatchingPair] {
        &self.matching
    }

    pub fn matching_in(&self, category: MatchingCategory) -> impl Iterator<Item = &MatchingPair> {
        self.matching
            .iter()
            .filter(move |pair| pair.category == category)
    }

    #[must_use]
    pub fn matching_count(&self, category: MatchingCategory) -> usize {
        self.matching_in(category).count()
    }

    /// Scan the bank for repeated content.
    #[must_use]
    pub fn audit(&self) -> BankAudit {
        let all_levers: Vec<&LeverQuestion> = Difficulty::ALL
            .into_iter()
            .flat_map(|difficulty| self.levers(difficulty))
            .collect();

        let mut class_distribution: Vec<(LeverClass, usize)> = LeverClass::ALL
            .into_iter()
            .map(|class| {
                let count = all_levers.iter().filter(|q| q.class == class).count();
                (class, count)
            })
            .collect();
        class_distribution.retain(|(_, count)| *count > 0);

        BankAudit {
            lever_questions: all_levers.len(),
            duplicate_lever_questions: duplicates(all_levers.iter().map(|q| q.question.as_str())),
            lever_class_distribution: class_distribution,
            who_am_i_questions: self.who_am_i.len(),
            duplicate_who_am_i_answers: duplicates(self.who_am_i.iter().map(|q| q.answer.as_str())),
            duplicate_hints: duplicates(
                self.who_am_i
                    .iter()
                    .flat_map(|q| q.hints.iter().map(String::as_str)),
            ),
            movement_questions: self.movement.len(),
            duplicate_movement_titles: duplicates(self.movement.iter().map(|q| q.title.as_str())),
            duplicate_movement_images: duplicates(
                self.movement.iter().map(|q| q.image_url.as_str()),
            ),
            matching_pairs: self.matching.len(),
            duplicate_pairs: duplicates(
                self.matching
                    .iter()
                    .map(|p| format!("{} → {}", p.left, p.right)),
            ),
            repeated_left: duplicates(self.matching.iter().map(|p| p.left.as_str())),
            repeated_right: duplicates(self.matching.iter().map(|p| p.right.as_str())),
        }
    }
}

//
// ─── AUDIT ─────────────────────────────────────────────────────────────────────
//

/// A value that occurs more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub value: String,
    pub count: usize,
}

/// Content audit of a bank.
///
/// Duplicate questions, answers, titles and pairs are errors. Repeated hints,
/// images and matching sides are warnings: the lever examples reuse class
/// names on the left on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAudit {
    pub lever_questions: usize,
    pub duplicate_lever_questions: Vec<Duplicate>,
    pub lever_class_distribution: Vec<(LeverClass, usize)>,
    pub who_am_i_questions: usize,
    pub duplicate_who_am_i_answers: Vec<Duplicate>,
    pub duplicate_hints: Vec<Duplicate>,
    pub movement_questions: usize,
    pub duplicate_movement_titles: Vec<Duplicate>,
    pub duplicate_movement_images: Vec<Duplicate>,
    pub matching_pairs: usize,
    pub duplicate_pairs: Vec<Duplicate>,
    pub repeated_left: Vec<Duplicate>,
    pub repeated_right: Vec<Duplicate>,
}

impl BankAudit {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !(self.duplicate_lever_questions.is_empty()
            && self.duplicate_who_am_i_answers.is_empty()
            && self.duplicate_movement_titles.is_empty()
            && self.duplicate_pairs.is_empty())
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !(self.duplicate_hints.is_empty()
            && self.duplicate_movement_images.is_empty()
            && self.repeated_left.is_empty()
            && self.repeated_right.is_empty())
    }
}

/// Values seen more than once, in order of first appearance.
fn duplicates<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Vec<Duplicate> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let value = value.as_ref();
        let count = counts.entry(value.to_owned()).or_insert_with(|| {
            order.push(value.to_owned());
            0
        });
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|value| {
            let count = counts[&value];
            (count > 1).then_some(Duplicate { value, count })
        })
        .collect()
}
