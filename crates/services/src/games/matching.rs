use bio_core::Shuffler;
use bio_core::model::{MatchingCategory, MatchingPair, QuestionBank};

use crate::error::SessionError;

use super::policy::{GamePolicy, MATCHING_DRAW_SIZE};
use super::round::{Check, Round};
use super::session::{GameMode, GameSession};

/// Connect each concept on the left with its counterpart on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matching;

pub type MatchingSession = GameSession<Matching>;

impl GameMode for Matching {
    type Config = MatchingCategory;
    type Round = MatchingRound;

    fn policy() -> GamePolicy {
        GamePolicy::matching()
    }

    /// One board of up to eight pairs drawn from the category.
    fn build_rounds(
        bank: &QuestionBank,
        category: &MatchingCategory,
        shuffler: &mut Shuffler,
    ) -> Vec<MatchingRound> {
        let mut pairs: Vec<MatchingPair> = bank.matching_in(*category).cloned().collect();
        if pairs.is_empty() {
            return Vec::new();
        }
        shuffler.shuffle(&mut pairs);
        pairs.truncate(MATCHING_DRAW_SIZE);

        let mut right: Vec<String> = pairs.iter().map(|pair| pair.right.clone()).collect();
        shuffler.shuffle(&mut right);
        vec![MatchingRound { pairs, right }]
    }
}

/// A board: left terms in draw order, right terms in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingRound {
    pairs: Vec<MatchingPair>,
    right: Vec<String>,
}

impl MatchingRound {
    #[must_use]
    pub fn pairs(&self) -> &[MatchingPair] {
        &self.pairs
    }

    pub fn left_column(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.left.as_str())
    }

    #[must_use]
    pub fn right_column(&self) -> &[String] {
        &self.right
    }

    /// The right column as currently laid out, one slot per left term.
    #[must_use]
    pub fn current_arrangement(&self) -> Vec<usize> {
        (0..self.right.len()).collect()
    }

    fn validate(&self, arrangement: &[usize]) -> Result<(), SessionError> {
        if arrangement.len() != self.pairs.len() {
            return Err(SessionError::InvalidAnswer(format!(
                "expected {} placements, got {}",
                self.pairs.len(),
                arrangement.len()
            )));
        }
        let mut used = vec![false; self.right.len()];
        for &slot in arrangement {
            match used.get_mut(slot) {
                Some(taken) if !*taken => *taken = true,
                Some(_) => {
                    return Err(SessionError::InvalidAnswer(format!(
                        "right term {slot} placed twice"
                    )));
                }
                None => {
                    return Err(SessionError::InvalidAnswer(format!(
                        "no right term at position {slot}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Round for MatchingRound {
    /// For each left term, the position in [`MatchingRound::right_column`]
    /// placed beside it. Must use every position exactly once.
    type Answer = [usize];

    /// A placement is correct when the text beside the left term equals its
    /// expected text, so repeated right terms are interchangeable.
    fn check(&self, arrangement: &[usize]) -> Result<Check, SessionError> {
        self.validate(arrangement)?;
        let marks = self
            .pairs
            .iter()
            .zip(arrangement)
            .map(|(pair, &slot)| self.right.get(slot).is_some_and(|text| *text == pair.right))
            .collect();
        Ok(Check { marks })
    }

    fn describe(&self, arrangement: &[usize]) -> String {
        self.pairs
            .iter()
            .zip(arrangement)
            .map(|(pair, &slot)| {
                let placed = self.right.get(slot).map_or("?", String::as_str);
                format!("{} → {placed}", pair.left)
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn solution(&self) -> String {
        self.pairs
            .iter()
            .map(|pair| format!("{} → {}", pair.left, pair.right))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn reshuffle(&mut self, shuffler: &mut Shuffler) -> bool {
        shuffler.shuffle(&mut self.right);
        true
    }
}
