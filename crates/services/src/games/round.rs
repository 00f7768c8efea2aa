use bio_core::Shuffler;

use crate::error::SessionError;

/// Per-unit verdict of one answer. Single-answer games have one unit,
/// matching has one per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub marks: Vec<bool>,
}

impl Check {
    #[must_use]
    pub fn single(correct: bool) -> Self {
        Self {
            marks: vec![correct],
        }
    }

    #[must_use]
    pub fn matched(&self) -> u32 {
        u32::try_from(self.marks.iter().filter(|ok| **ok).count()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.marks.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        !self.marks.is_empty() && self.marks.iter().all(|ok| *ok)
    }
}

/// One question as presented to the player.
pub trait Round {
    type Answer: ?Sized;

    /// Grade an answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidAnswer` when the answer does not fit the
    /// question (option out of range, malformed assignment).
    fn check(&self, answer: &Self::Answer) -> Result<Check, SessionError>;

    /// Human-readable form of an answer, kept with the feedback.
    fn describe(&self, answer: &Self::Answer) -> String;

    /// Ground truth, revealed once the round is resolved.
    fn solution(&self) -> String;

    /// Number of hints the round carries.
    fn hint_count(&self) -> usize {
        0
    }

    /// Re-order the presented options. Returns `false` if the round has none to shuffle.
    fn reshuffle(&mut self, _shuffler: &mut Shuffler) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_counts_marks() {
        let check = Check {
            marks: vec![true, false, true],
        };
        assert_eq!(check.matched(), 2);
        assert_eq!(check.total(), 3);
        assert!(!check.is_correct());
        assert!(Check::single(true).is_correct());
        assert!(!Check { marks: Vec::new() }.is_correct());
    }
}
