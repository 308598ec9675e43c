use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::PaperQuestion;

/// Why an attempt was finalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SubmitReason {
    #[strum(serialize = "manual")]
    Manual,
    #[strum(serialize = "time expired")]
    TimeExpired,
}

/// Completion report captured at the moment of submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub answered: usize,
    pub total: usize,
    pub reason: SubmitReason,
}

impl SubmissionSummary {
    pub fn toast_message(&self) -> String {
        format!(
            "Exam submitted! You answered {} out of {} questions.",
            self.answered, self.total
        )
    }
}

impl fmt::Display for SubmissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} answered", self.answered, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Submitted(SubmissionSummary),
}

/// One examinee's run through a fixed question list.
///
/// Every mutating operation is a no-op once the attempt is submitted, and the
/// index is kept inside `[0, n-1]` no matter what the caller asks for.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<PaperQuestion>,
    index: usize,
    answers: BTreeMap<usize, String>,
    remaining_secs: u64,
    phase: Phase,
}

impl ExamSession {
    pub fn new(questions: Vec<PaperQuestion>, remaining_secs: u64) -> Self {
        Self {
            questions,
            index: 0,
            answers: BTreeMap::new(),
            remaining_secs,
            phase: Phase::InProgress,
        }
    }

    pub fn questions(&self) -> &[PaperQuestion] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&PaperQuestion> {
        self.questions.get(self.index)
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted(_))
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Fraction of the paper reached so far, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.questions.len() as f64
    }

    pub fn select_answer(&mut self, option: impl Into<String>) {
        if self.is_submitted() || self.questions.is_empty() {
            return;
        }
        self.answers.insert(self.index, option.into());
    }

    pub fn go_next(&mut self) {
        if self.is_submitted() {
            return;
        }
        if !self.is_last_question() {
            self.index += 1;
        }
    }

    pub fn go_previous(&mut self) {
        if self.is_submitted() {
            return;
        }
        self.index = self.index.saturating_sub(1);
    }

    pub fn jump_to(&mut self, index: usize) {
        if self.is_submitted() {
            return;
        }
        self.index = index.min(self.questions.len().saturating_sub(1));
    }

    /// One second of countdown. Returns the summary when this tick expired the attempt.
    pub fn tick(&mut self) -> Option<SubmissionSummary> {
        if self.is_submitted() {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.finalize(SubmitReason::TimeExpired);
        }
        None
    }

    /// Manual submission. Returns `None` if the attempt was already submitted.
    pub fn submit(&mut self) -> Option<SubmissionSummary> {
        self.finalize(SubmitReason::Manual)
    }

    fn finalize(&mut self, reason: SubmitReason) -> Option<SubmissionSummary> {
        if self.is_submitted() {
            return None;
        }

        let summary = SubmissionSummary {
            answered: self.answers.len(),
            total: self.questions.len(),
            reason,
        };
        self.phase = Phase::Submitted(summary);
        Some(summary)
    }
}
