use serde::{Deserialize, Serialize};

/// Who authored a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Ai,
}

/// One entry in the Q&A transcript for the active lesson.
///
/// The transcript is scoped to a single lesson and is replaced wholesale
/// when the active lesson changes; entries are never edited or removed
/// individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::Ai,
            text: text.into(),
        }
    }
}
