use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUIZ TYPES ────────────────────────────────────────────────────────────────
//

/// Raw multiple-choice question as returned by the generation capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestionDraft {
    /// Validate the draft.
    ///
    /// # Errors
    ///
    /// Rejects empty question text, fewer than two options, an empty
    /// correct answer, or a correct answer that is not one of the options.
    /// The last check is a hard precondition: a question whose answer is
    /// not among its options can never be scored.
    pub fn validate(self) -> Result<ValidatedQuestion, QuizError> {
        if self.question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if self.options.len() < 2 {
            return Err(QuizError::TooFewOptions {
                count: self.options.len(),
            });
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuizError::EmptyCorrectAnswer);
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(QuizError::AnswerNotInOptions);
        }
        Ok(ValidatedQuestion { draft: self })
    }
}

/// A question that passed validation and is waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    draft: QuizQuestionDraft,
}

impl ValidatedQuestion {
    /// Attach a freshly minted question id.
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> QuizQuestion {
        QuizQuestion {
            id,
            question: self.draft.question,
            options: self.draft.options,
            correct_answer: self.draft.correct_answer,
        }
    }
}

/// A scoreable multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Exact-equality check of a submitted answer against the correct one.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

//
// ─── QUIZ VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz question text is empty")]
    EmptyQuestion,

    #[error("quiz question has {count} options, need at least 2")]
    TooFewOptions { count: usize },

    #[error("quiz question has an empty correct answer")]
    EmptyCorrectAnswer,

    #[error("quiz correct answer is not one of the options")]
    AnswerNotInOptions,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
