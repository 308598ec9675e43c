//! In-memory exam drafts.
//!
//! A draft is never mutated in place: every edit returns a new snapshot, and
//! question records that an edit did not touch are shared between snapshots.

use std::sync::Arc;

use crate::catalog::OPTION_COUNT;

pub type QuestionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please fill in exam title and description")]
    MissingDetails,
    #[error("Please complete all questions and options")]
    IncompleteQuestions,
    #[error("Duration must be a whole number of minutes greater than zero")]
    InvalidDuration,
    #[error("An exam needs at least one question")]
    LastQuestion,
    #[error("Option {0} does not exist")]
    OptionOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    correct_answer: usize,
}

impl Question {
    fn blank(id: QuestionId) -> Self {
        Self {
            id,
            text: String::new(),
            options: Default::default(),
            correct_answer: 0,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    fn is_complete(&self) -> bool {
        !self.text.is_empty() && self.options.iter().all(|o| !o.is_empty())
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDefinition {
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct ExamDraft {
    title: String,
    description: String,
    duration: String,
    questions: Arc<[Arc<Question>]>,
    next_id: QuestionId,
}

impl Default for ExamDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: "60".to_string(),
            questions: Arc::from(vec![Arc::new(Question::blank(1))]),
            next_id: 2,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn questions(&self) -> impl ExactSizeIterator<Item = &Question> {
        self.questions.iter().map(|q| q.as_ref())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index).map(|q| q.as_ref())
    }

    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }

    pub fn with_duration(&self, duration: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            ..self.clone()
        }
    }

    /// Append a blank question at the end of the list
    pub fn add_question(&self) -> Self {
        let mut questions = self.questions.to_vec();
        questions.push(Arc::new(Question::blank(self.next_id)));
        Self {
            questions: questions.into(),
            next_id: self.next_id + 1,
            ..self.clone()
        }
    }

    pub fn remove_question(&self, id: QuestionId) -> Result<Self, DraftError> {
        if self.questions.len() <= 1 {
            return Err(DraftError::LastQuestion);
        }
        let questions: Vec<_> = self
            .questions
            .iter()
            .filter(|q| q.id != id)
            .cloned()
            .collect();
        Ok(Self {
            questions: questions.into(),
            ..self.clone()
        })
    }

    pub fn update_question_text(&self, id: QuestionId, text: impl Into<String>) -> Self {
        let text = text.into();
        self.map_question(id, |q| Question {
            text: text.clone(),
            ..q.clone()
        })
    }

    pub fn update_option(
        &self,
        id: QuestionId,
        option: usize,
        value: impl Into<String>,
    ) -> Result<Self, DraftError> {
        if option >= OPTION_COUNT {
            return Err(DraftError::OptionOutOfRange(option));
        }
        let value = value.into();
        Ok(self.map_question(id, |q| {
            let mut options = q.options.clone();
            options[option] = value.clone();
            Question {
                options,
                ..q.clone()
            }
        }))
    }

    pub fn set_correct_answer(&self, id: QuestionId, option: usize) -> Result<Self, DraftError> {
        if option >= OPTION_COUNT {
            return Err(DraftError::OptionOutOfRange(option));
        }
        Ok(self.map_question(id, |q| Question {
            correct_answer: option,
            ..q.clone()
        }))
    }

    pub fn validate(&self) -> Result<ExamDefinition, DraftError> {
        if self.title.is_empty() || self.description.is_empty() {
            return Err(DraftError::MissingDetails);
        }

        if !self.questions.iter().all(|q| q.is_complete()) {
            return Err(DraftError::IncompleteQuestions);
        }

        let duration_minutes = match self.duration.trim().parse::<u32>() {
            Ok(minutes) if minutes >= 1 => minutes,
            _ => return Err(DraftError::InvalidDuration),
        };

        Ok(ExamDefinition {
            title: self.title.clone(),
            description: self.description.clone(),
            duration_minutes,
            questions: self.questions.iter().map(|q| q.as_ref().clone()).collect(),
        })
    }

    fn map_question(&self, id: QuestionId, f: impl Fn(&Question) -> Question) -> Self {
        let questions: Vec<_> = self
            .questions
            .iter()
            .map(|q| {
                if q.id == id {
                    Arc::new(f(q.as_ref()))
                } else {
                    Arc::clone(q)
                }
            })
            .collect();
        Self {
            questions: questions.into(),
            ..self.clone()
        }
    }
}
