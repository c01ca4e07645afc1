mod chat;
mod course;
mod ids;
mod proficiency;
mod quiz;
mod seed;

pub use ids::{CourseId, LessonId, QuestionId, SectionId};

pub use chat::{ChatMessage, ChatSender};
pub use course::{
    Course, GroundingSource, Lesson, LessonStatus, OutlineDraft, OutlineError, Section,
    SectionDraft, ValidatedOutline,
};
pub use proficiency::Proficiency;
pub use quiz::{QuizError, QuizQuestion, QuizQuestionDraft, ValidatedQuestion};
pub use seed::{CourseSeed, GroundingStrategy, SeedError};
