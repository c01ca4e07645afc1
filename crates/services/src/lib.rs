#![forbid(unsafe_code)]

pub mod ai;
pub mod course_session;
pub mod error;
pub mod generation_service;

pub use course_core::Clock;

pub use course_session::{CourseSession, Screen};
pub use error::GenerationError;
pub use generation_service::{
    CourseGenerator, GenerationService, LessonMaterial, build_outline_request,
};
