use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{CourseId, LessonId, SectionId};
use crate::model::quiz::QuizQuestion;

//
// ─── COURSE TYPES ──────────────────────────────────────────────────────────────
//

/// Lifecycle status of a lesson within a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Locked,
    Unlocked,
    Completed,
}

/// A web source the outline generation was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    uri: String,
    title: String,
}

impl GroundingSource {
    /// Create a grounding source from a citation.
    ///
    /// The title falls back to the uri when absent or blank.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::InvalidSourceUri` if the uri does not parse
    /// as an absolute URL.
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Result<Self, OutlineError> {
        let uri = uri.into();
        Url::parse(&uri).map_err(|_| OutlineError::InvalidSourceUri { uri: uri.clone() })?;
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => uri.clone(),
        };
        Ok(Self { uri, title })
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A single lesson inside a section.
///
/// Content and quiz are populated together on first visit and are never
/// cleared or regenerated for this lesson instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    status: LessonStatus,
    content: Option<String>,
    quiz: Option<Vec<QuizQuestion>>,
}

impl Lesson {
    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn status(&self) -> LessonStatus {
        self.status
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&[QuizQuestion]> {
        self.quiz.as_deref()
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Attach generated content and quiz, forcing the status to `Unlocked`.
    ///
    /// First population wins: once a lesson carries content, later calls
    /// are ignored.
    pub fn attach_material(&mut self, content: String, quiz: Vec<QuizQuestion>) {
        if self.content.is_some() {
            return;
        }
        self.content = Some(content);
        self.quiz = Some(quiz);
        self.status = LessonStatus::Unlocked;
    }

    /// Mark the lesson as completed.
    pub fn complete(&mut self) {
        self.status = LessonStatus::Completed;
    }

    /// Unlock the lesson if it is currently locked; other statuses are
    /// kept as-is.
    pub fn unlock(&mut self) {
        if self.status == LessonStatus::Locked {
            self.status = LessonStatus::Unlocked;
        }
    }
}

/// An ordered group of lessons. Sections are never reordered after
/// assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    title: String,
    lessons: Vec<Lesson>,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }
}

/// A generated course: the outline skeleton plus lazily filled lesson
/// material.
///
/// Replaced wholesale when a new course is generated or cleared; the id is
/// immutable for the lifetime of the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    sections: Vec<Section>,
    sources: Vec<GroundingSource>,
    created_at: DateTime<Utc>,
}

impl Course {
    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn sources(&self) -> &[GroundingSource] {
        &self.sources
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Iterate over every lesson in section order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.sections.iter().flat_map(|s| s.lessons.iter())
    }

    /// Linear scan for a lesson by id.
    #[must_use]
    pub fn find_lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons().find(|l| l.id() == id)
    }

    /// Mutable lookup of a lesson by id.
    pub fn lesson_mut(&mut self, id: &LessonId) -> Option<&mut Lesson> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.lessons.iter_mut())
            .find(|l| l.id() == id)
    }

    /// Resolve the lesson that follows `id` in progression order: the next
    /// lesson within the same section by position, else the first lesson of
    /// the next section, else none.
    ///
    /// Sections past the current one are not skipped: if the next section
    /// is empty, there is no next lesson.
    #[must_use]
    pub fn next_after(&self, id: &LessonId) -> Option<&Lesson> {
        let section_idx = self
            .sections
            .iter()
            .position(|s| s.lessons.iter().any(|l| l.id() == id))?;
        let section = &self.sections[section_idx];
        let lesson_idx = section.lessons.iter().position(|l| l.id() == id)?;

        if lesson_idx + 1 < section.lessons.len() {
            return Some(&section.lessons[lesson_idx + 1]);
        }
        self.sections
            .get(section_idx + 1)
            .and_then(|next| next.lessons.first())
    }
}

//
// ─── OUTLINE DRAFT ─────────────────────────────────────────────────────────────
//

/// Raw outline shape as returned by the generation capability, before
/// validation and id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineDraft {
    pub title: String,
    pub description: String,
    pub sections: Vec<SectionDraft>,
}

/// One section of an outline draft: a title plus ordered lesson titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub title: String,
    pub lessons: Vec<String>,
}

impl OutlineDraft {
    /// Validate the draft wholesale.
    ///
    /// # Errors
    ///
    /// Rejects the entire draft if the title or description is blank, there
    /// are no sections, a section title or lesson title is blank, or the
    /// outline contains no lessons at all. No partial course is ever
    /// produced from an invalid draft.
    pub fn validate(self) -> Result<ValidatedOutline, OutlineError> {
        if self.title.trim().is_empty() {
            return Err(OutlineError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(OutlineError::EmptyDescription);
        }
        if self.sections.is_empty() {
            return Err(OutlineError::NoSections);
        }
        let mut lesson_count = 0usize;
        for (s_idx, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(OutlineError::EmptySectionTitle { section: s_idx + 1 });
            }
            for (l_idx, lesson) in section.lessons.iter().enumerate() {
                if lesson.trim().is_empty() {
                    return Err(OutlineError::EmptyLessonTitle {
                        section: s_idx + 1,
                        lesson: l_idx + 1,
                    });
                }
                lesson_count += 1;
            }
        }
        if lesson_count == 0 {
            return Err(OutlineError::NoLessons);
        }
        Ok(ValidatedOutline { draft: self })
    }
}

/// An outline draft that passed validation and can be assembled into a
/// course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOutline {
    draft: OutlineDraft,
}

impl ValidatedOutline {
    /// Assemble the final course: mint a course id, assign positional
    /// section and lesson ids, and lock every lesson except the first
    /// lesson overall, which starts unlocked (the frontier).
    #[must_use]
    pub fn assemble(self, sources: Vec<GroundingSource>, now: DateTime<Utc>) -> Course {
        let mut first_lesson = true;
        let sections = self
            .draft
            .sections
            .into_iter()
            .enumerate()
            .map(|(s_idx, section)| Section {
                id: SectionId::from_position(s_idx + 1),
                title: section.title,
                lessons: section
                    .lessons
                    .into_iter()
                    .enumerate()
                    .map(|(l_idx, title)| {
                        let status = if first_lesson {
                            first_lesson = false;
                            LessonStatus::Unlocked
                        } else {
                            LessonStatus::Locked
                        };
                        Lesson {
                            id: LessonId::from_positions(s_idx + 1, l_idx + 1),
                            title,
                            status,
                            content: None,
                            quiz: None,
                        }
                    })
                    .collect(),
            })
            .collect();

        Course {
            id: CourseId::mint(),
            title: self.draft.title,
            description: self.draft.description,
            sections,
            sources,
            created_at: now,
        }
    }
}

//
// ─── OUTLINE VALIDATION ERRORS ─────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutlineError {
    #[error("course title is missing or empty")]
    EmptyTitle,

    #[error("course description is missing or empty")]
    EmptyDescription,

    #[error("course outline has no sections")]
    NoSections,

    #[error("course outline has no lessons")]
    NoLessons,

    #[error("section {section} has an empty title")]
    EmptySectionTitle { section: usize },

    #[error("lesson {lesson} in section {section} has an empty title")]
    EmptyLessonTitle { section: usize, lesson: usize },

    #[error("grounding source uri is not a valid url: {uri}")]
    InvalidSourceUri { uri: String },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft(sections: Vec<SectionDraft>) -> OutlineDraft {
        OutlineDraft {
            title: "Rust Fundamentals".into(),
            description: "A short course on Rust.".into(),
            sections,
        }
    }

    fn two_section_draft() -> OutlineDraft {
        draft(vec![
            SectionDraft {
                title: "Basics".into(),
                lessons: vec!["Ownership".into(), "Borrowing".into()],
            },
            SectionDraft {
                title: "Traits".into(),
                lessons: vec!["Trait objects".into()],
            },
        ])
    }

    #[test]
    fn assembled_course_has_exactly_one_unlocked_lesson() {
        let course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());

        let unlocked: Vec<_> = course
            .lessons()
            .filter(|l| l.status() == LessonStatus::Unlocked)
            .collect();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id().as_str(), "l-1-1");
        assert!(
            course
                .lessons()
                .skip(1)
                .all(|l| l.status() == LessonStatus::Locked)
        );
    }

    #[test]
    fn assembled_course_assigns_positional_ids() {
        let course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());

        assert_eq!(course.sections()[0].id().as_str(), "sec-1");
        assert_eq!(course.sections()[1].id().as_str(), "sec-2");
        assert_eq!(course.sections()[1].lessons()[0].id().as_str(), "l-2-1");
    }

    #[test]
    fn frontier_skips_leading_empty_section() {
        let course = draft(vec![
            SectionDraft {
                title: "Preface".into(),
                lessons: vec![],
            },
            SectionDraft {
                title: "Basics".into(),
                lessons: vec!["Ownership".into()],
            },
        ])
        .validate()
        .unwrap()
        .assemble(Vec::new(), fixed_now());

        let first = course.lessons().next().unwrap();
        assert_eq!(first.id().as_str(), "l-2-1");
        assert_eq!(first.status(), LessonStatus::Unlocked);
    }

    #[test]
    fn outline_rejects_blank_title() {
        let mut d = two_section_draft();
        d.title = "   ".into();
        assert_eq!(d.validate().unwrap_err(), OutlineError::EmptyTitle);
    }

    #[test]
    fn outline_rejects_missing_description() {
        let mut d = two_section_draft();
        d.description = String::new();
        assert_eq!(d.validate().unwrap_err(), OutlineError::EmptyDescription);
    }

    #[test]
    fn outline_rejects_no_sections() {
        assert_eq!(
            draft(vec![]).validate().unwrap_err(),
            OutlineError::NoSections
        );
    }

    #[test]
    fn outline_rejects_zero_lessons_overall() {
        let d = draft(vec![SectionDraft {
            title: "Empty".into(),
            lessons: vec![],
        }]);
        assert_eq!(d.validate().unwrap_err(), OutlineError::NoLessons);
    }

    #[test]
    fn outline_rejects_blank_lesson_title() {
        let d = draft(vec![SectionDraft {
            title: "Basics".into(),
            lessons: vec!["Ownership".into(), " ".into()],
        }]);
        assert_eq!(
            d.validate().unwrap_err(),
            OutlineError::EmptyLessonTitle {
                section: 1,
                lesson: 2
            }
        );
    }

    #[test]
    fn next_after_within_section() {
        let course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());
        let first = LessonId::from_positions(1, 1);
        let next = course.next_after(&first).unwrap();
        assert_eq!(next.id().as_str(), "l-1-2");
    }

    #[test]
    fn next_after_crosses_section_boundary() {
        let course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());
        let last_of_first = LessonId::from_positions(1, 2);
        let next = course.next_after(&last_of_first).unwrap();
        assert_eq!(next.id().as_str(), "l-2-1");
    }

    #[test]
    fn next_after_last_lesson_is_none() {
        let course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());
        let last = LessonId::from_positions(2, 1);
        assert!(course.next_after(&last).is_none());
    }

    #[test]
    fn next_after_stops_at_empty_next_section() {
        let course = draft(vec![
            SectionDraft {
                title: "Basics".into(),
                lessons: vec!["Ownership".into()],
            },
            SectionDraft {
                title: "Appendix".into(),
                lessons: vec![],
            },
        ])
        .validate()
        .unwrap()
        .assemble(Vec::new(), fixed_now());

        let only = LessonId::from_positions(1, 1);
        assert!(course.next_after(&only).is_none());
    }

    #[test]
    fn attach_material_is_first_write_wins() {
        let mut course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());
        let id = LessonId::from_positions(1, 1);
        let lesson = course.lesson_mut(&id).unwrap();

        lesson.attach_material("first".into(), Vec::new());
        lesson.attach_material("second".into(), Vec::new());

        assert_eq!(lesson.content(), Some("first"));
        assert_eq!(lesson.status(), LessonStatus::Unlocked);
    }

    #[test]
    fn unlock_leaves_completed_untouched() {
        let mut course = two_section_draft()
            .validate()
            .unwrap()
            .assemble(Vec::new(), fixed_now());
        let id = LessonId::from_positions(1, 1);
        let lesson = course.lesson_mut(&id).unwrap();
        lesson.complete();
        lesson.unlock();
        assert_eq!(lesson.status(), LessonStatus::Completed);
    }

    #[test]
    fn grounding_source_title_falls_back_to_uri() {
        let source = GroundingSource::new("https://example.com/a", None).unwrap();
        assert_eq!(source.title(), "https://example.com/a");

        let named =
            GroundingSource::new("https://example.com/a", Some("Example".into())).unwrap();
        assert_eq!(named.title(), "Example");
    }

    #[test]
    fn grounding_source_rejects_relative_uri() {
        let err = GroundingSource::new("not a url", None).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidSourceUri { .. }));
    }
}
