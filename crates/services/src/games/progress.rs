use super::policy::GamePolicy;

/// Where a session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectingConfiguration,
    Answering,
    ShowingFeedback,
    Completed,
}

/// Final verdict on one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Incorrect,
}

/// Result of one submission, kept until the session moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// The answer as the player gave it.
    pub given: String,
    pub correct: bool,
    /// Units judged correct (always 0 or 1 outside matching).
    pub matched: u32,
    pub total: u32,
    pub marks: Vec<bool>,
    /// Points paid out by this submission.
    pub awarded: u32,
    pub resolution: Option<Resolution>,
    /// Submissions made on this round so far, this one included.
    pub attempts: u32,
    /// Ground truth, present once the round is resolved.
    pub solution: Option<String>,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

/// Ephemeral state of the round being played. Rebuilt on every advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionProgress {
    revealed_hints: usize,
    submissions: u32,
    misses: u32,
    question_score: u32,
    resolution: Option<Resolution>,
    feedback: Option<AnswerFeedback>,
}

impl QuestionProgress {
    pub(crate) fn fresh(policy: &GamePolicy, hint_count: usize) -> Self {
        Self {
            revealed_hints: hint_count.min(1),
            submissions: 0,
            misses: 0,
            question_score: policy.initial_question_score(),
            resolution: None,
            feedback: None,
        }
    }

    /// Hints visible to the player, the first one included.
    #[must_use]
    pub fn revealed_hints(&self) -> usize {
        self.revealed_hints
    }

    /// Incorrect submissions on this round.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.misses
    }

    #[must_use]
    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Points a correct answer would pay right now.
    #[must_use]
    pub fn question_score(&self) -> u32 {
        self.question_score
    }

    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    pub(crate) fn reveal_hint(&mut self, question_score: u32) {
        self.revealed_hints += 1;
        self.question_score = question_score;
    }

    pub(crate) fn record(&mut self, feedback: AnswerFeedback, misses: u32, question_score: u32) {
        self.submissions = feedback.attempts;
        self.misses = misses;
        self.question_score = question_score;
        self.resolution = feedback.resolution;
        self.feedback = Some(feedback);
    }

    pub(crate) fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}

/// Read-only overview of a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the current round; equals `total` once completed.
    pub index: usize,
    pub total: usize,
    pub correct: u32,
    pub incorrect: u32,
    pub score: u32,
}

impl SessionProgress {
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.index)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.index >= self.total
    }
}
