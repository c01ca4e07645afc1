//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::{OutlineError, QuizError};

/// Errors emitted by the AI generation gateway.
///
/// Every variant renders to a human-readable cause; the course session
/// stores the rendered string as its last error, so no structured codes
/// cross the view boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation is not configured: COURSE_AI_API_KEY is not set")]
    MissingApiKey,

    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("the model returned an empty or blocked response{}", reason_suffix(.reason))]
    EmptyResponse { reason: Option<String> },

    #[error("no fenced JSON block found in the model response")]
    MissingJsonBlock,

    #[error("the model response was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("the model returned an invalid course outline: {0}")]
    Outline(#[from] OutlineError),

    #[error("the model returned an invalid quiz question: {0}")]
    Quiz(#[from] QuizError),

    #[error("the model returned a lesson with no content")]
    EmptyLessonContent,

    #[error("the model returned a lesson with no quiz")]
    EmptyQuiz,
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" (reason: {reason})"),
        None => String::new(),
    }
}
