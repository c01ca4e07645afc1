use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a Course.
///
/// Minted fresh for every generated course; never reused across generations.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(String);

impl CourseId {
    /// Mints a fresh course identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(format!("course-{}", Uuid::new_v4()))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Positional identifier for a Section (`sec-{n}`, 1-based).
///
/// Assigned once at course assembly and never reassigned; sections are
/// never reordered afterwards.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a section identifier from its 1-based position.
    #[must_use]
    pub fn from_position(position: usize) -> Self {
        Self(format!("sec-{position}"))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Positional identifier for a Lesson (`l-{section}-{lesson}`, 1-based).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonId(String);

impl LessonId {
    /// Creates a lesson identifier from 1-based section and lesson positions.
    #[must_use]
    pub fn from_positions(section: usize, lesson: usize) -> Self {
        Self(format!("l-{section}-{lesson}"))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a quiz question.
///
/// Minted when the gateway returns a validated quiz; question ids are never
/// carried over between regenerations of the same lesson title.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Mints a fresh question identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(format!("q-{}", Uuid::new_v4()))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_positional() {
        let id = SectionId::from_position(3);
        assert_eq!(id.to_string(), "sec-3");
    }

    #[test]
    fn test_lesson_id_positional() {
        let id = LessonId::from_positions(2, 5);
        assert_eq!(id.to_string(), "l-2-5");
    }

    #[test]
    fn test_first_lesson_id_shape() {
        let id = LessonId::from_positions(1, 1);
        assert_eq!(id.as_str(), "l-1-1");
    }

    #[test]
    fn test_course_id_prefix_and_uniqueness() {
        let a = CourseId::mint();
        let b = CourseId::mint();
        assert!(a.as_str().starts_with("course-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_question_id_prefix_and_uniqueness() {
        let a = QuestionId::mint();
        let b = QuestionId::mint();
        assert!(a.as_str().starts_with("q-"));
        assert_ne!(a, b);
    }
}
