use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use course_core::model::{
    ChatMessage, Course, CourseSeed, GroundingStrategy, Lesson, LessonId, Proficiency, QuestionId,
};

use crate::generation_service::{CourseGenerator, GenerationService};

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// Which top-level view the session currently drives. Successful course
/// creation moves to `Course`; clearing moves back to `Creation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Creation,
    Course,
}

//
// ─── COURSE SESSION ────────────────────────────────────────────────────────────
//

/// The course-progression state machine.
///
/// Owns the course graph, per-lesson proficiency, the chat transcript for
/// the active lesson, and the next-lesson pointer for one session (from
/// course creation or clear to the next). Views read snapshots through the
/// accessors and invoke the operations; nothing outside this type mutates
/// the state.
///
/// Operations take `&mut self`, so two operations on one session can never
/// interleave; callers decide whether to serialize user actions behind the
/// busy flag.
pub struct CourseSession {
    generator: Arc<dyn CourseGenerator>,
    course: Option<Course>,
    proficiency: HashMap<LessonId, Proficiency>,
    active_lesson: Option<Lesson>,
    chat: Vec<ChatMessage>,
    next_lesson_id: Option<LessonId>,
    busy: bool,
    last_error: Option<String>,
    screen: Screen,
}

impl CourseSession {
    #[must_use]
    pub fn new(generator: Arc<dyn CourseGenerator>) -> Self {
        Self {
            generator,
            course: None,
            proficiency: HashMap::new(),
            active_lesson: None,
            chat: Vec::new(),
            next_lesson_id: None,
            busy: false,
            last_error: None,
            screen: Screen::default(),
        }
    }

    /// Session wired to the environment-configured generation service.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Arc::new(GenerationService::from_env()))
    }

    // ─── Snapshots ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    #[must_use]
    pub fn active_lesson(&self) -> Option<&Lesson> {
        self.active_lesson.as_ref()
    }

    #[must_use]
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    #[must_use]
    pub fn next_lesson_id(&self) -> Option<&LessonId> {
        self.next_lesson_id.as_ref()
    }

    /// Proficiency for a lesson; `New` when the lesson has no entry yet.
    #[must_use]
    pub fn proficiency_of(&self, lesson_id: &LessonId) -> Proficiency {
        self.proficiency
            .get(lesson_id)
            .copied()
            .unwrap_or(Proficiency::New)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    // ─── Operations ────────────────────────────────────────────────────────

    /// Generate a new course from a seed.
    ///
    /// On success the previous course, active lesson, transcript, and
    /// next-lesson pointer are replaced and every lesson starts at
    /// proficiency `New`. On failure the error is recorded and all prior
    /// state is left untouched.
    pub async fn create_course(&mut self, seed: &CourseSeed, strategy: GroundingStrategy) {
        self.last_error = None;
        self.busy = true;

        let generator = Arc::clone(&self.generator);
        match generator.generate_outline(seed, strategy).await {
            Ok(course) => {
                self.proficiency = course
                    .lessons()
                    .map(|lesson| (lesson.id().clone(), Proficiency::New))
                    .collect();
                self.course = Some(course);
                self.active_lesson = None;
                self.chat.clear();
                self.next_lesson_id = None;
                self.screen = Screen::Course;
            }
            Err(err) => {
                self.last_error = Some(format!("Failed to generate course: {err}"));
            }
        }

        self.busy = false;
    }

    /// Activate a lesson, generating its content and quiz on first visit.
    ///
    /// No-op when the lesson is already active or unknown to the course.
    /// The selection is optimistic: the lesson becomes active and the chat
    /// resets before the generation call; a failed call rolls the active
    /// lesson back to absent and records the error. A lesson that already
    /// carries content never triggers a second generation call.
    pub async fn select_lesson(&mut self, lesson_id: &LessonId) {
        if self
            .active_lesson
            .as_ref()
            .is_some_and(|active| active.id() == lesson_id)
        {
            return;
        }
        let Some(lesson) = self
            .course
            .as_ref()
            .and_then(|course| course.find_lesson(lesson_id))
            .cloned()
        else {
            return;
        };

        self.last_error = None;
        self.next_lesson_id = None;
        self.active_lesson = Some(lesson.clone());
        self.chat.clear();
        self.busy = true;

        if !lesson.has_content() {
            let course_title = self
                .course
                .as_ref()
                .map_or_else(|| "Course".to_string(), |c| c.title().to_string());
            let proficiency = self.proficiency_of(lesson_id);

            let generator = Arc::clone(&self.generator);
            match generator
                .generate_lesson_content(lesson.title(), &course_title, proficiency)
                .await
            {
                Ok(material) => {
                    if let Some(slot) = self
                        .course
                        .as_mut()
                        .and_then(|course| course.lesson_mut(lesson_id))
                    {
                        slot.attach_material(material.content, material.quiz);
                        self.active_lesson = Some(slot.clone());
                    }
                }
                Err(err) => {
                    self.last_error = Some(format!("Failed to load lesson content: {err}"));
                    self.active_lesson = None;
                }
            }
        }

        self.busy = false;
    }

    /// Score the active lesson's quiz and advance the progression frontier.
    ///
    /// No-op without a course, an active lesson, or a quiz. Scoring,
    /// completion, unlocking the next lesson, and recording the pointer are
    /// one atomic update; this operation has no failure cases.
    pub fn submit_quiz(&mut self, answers: &HashMap<QuestionId, String>) {
        if self.course.is_none() {
            return;
        }
        let Some(active) = self.active_lesson.as_ref() else {
            return;
        };
        let Some(quiz) = active.quiz() else {
            return;
        };
        let active_id = active.id().clone();

        let total = quiz.len();
        let correct = quiz
            .iter()
            .filter(|question| {
                answers
                    .get(question.id())
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count();
        self.proficiency
            .insert(active_id.clone(), Proficiency::from_score(correct, total));

        let (updated_active, next_id) = {
            let Some(course) = self.course.as_mut() else {
                return;
            };
            if let Some(lesson) = course.lesson_mut(&active_id) {
                lesson.complete();
            }
            let next_id = course.next_after(&active_id).map(|l| l.id().clone());
            if let Some(id) = &next_id {
                if let Some(next) = course.lesson_mut(id) {
                    next.unlock();
                }
            }
            (course.find_lesson(&active_id).cloned(), next_id)
        };

        self.active_lesson = updated_active;
        self.next_lesson_id = next_id;
    }

    /// Select the lesson the next-lesson pointer refers to; no-op without a
    /// pointer.
    pub async fn go_to_next_lesson(&mut self) {
        let Some(next_id) = self.next_lesson_id.clone() else {
            return;
        };
        self.select_lesson(&next_id).await;
    }

    /// Ask a question about the active lesson's content.
    ///
    /// No-op unless the active lesson has content. The user entry is
    /// appended before the call; the answer (or an `Error:`-prefixed
    /// message on failure) is appended after. Failures never break the
    /// transcript.
    pub async fn send_message(&mut self, text: impl Into<String>) {
        let Some(content) = self
            .active_lesson
            .as_ref()
            .and_then(|lesson| lesson.content())
            .map(ToString::to_string)
        else {
            return;
        };
        let text = text.into();

        self.chat.push(ChatMessage::user(text.clone()));
        self.busy = true;

        let generator = Arc::clone(&self.generator);
        match generator.ask_about_lesson(&text, &content).await {
            Ok(answer) => self.chat.push(ChatMessage::ai(answer)),
            Err(err) => self.chat.push(ChatMessage::ai(format!("Error: {err}"))),
        }

        self.busy = false;
    }

    /// Discard the course and all derived state; back to the creation
    /// screen.
    pub fn clear_course(&mut self) {
        self.course = None;
        self.proficiency.clear();
        self.active_lesson = None;
        self.chat.clear();
        self.next_lesson_id = None;
        self.last_error = None;
        self.screen = Screen::Creation;
    }
}

impl fmt::Debug for CourseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseSession")
            .field("course", &self.course.as_ref().map(Course::id))
            .field("active_lesson", &self.active_lesson.as_ref().map(Lesson::id))
            .field("chat_len", &self.chat.len())
            .field("next_lesson_id", &self.next_lesson_id)
            .field("busy", &self.busy)
            .field("last_error", &self.last_error)
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
