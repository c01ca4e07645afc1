use async_trait::async_trait;
use serde::Deserialize;

use course_core::Clock;
use course_core::model::{
    Course, CourseSeed, GroundingSource, GroundingStrategy, OutlineDraft, Proficiency, QuestionId,
    QuizQuestion, QuizQuestionDraft, SectionDraft,
};

use crate::ai::{Attachment, GenAiClient, GenerateRequest, WebCitation, extract, prompts, schema};
use crate::error::GenerationError;

//
// ─── GATEWAY CONTRACT ──────────────────────────────────────────────────────────
//

/// Lesson text plus its validated quiz, produced together and attached to a
/// lesson in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonMaterial {
    pub content: String,
    pub quiz: Vec<QuizQuestion>,
}

/// The three operations the course session needs from the generation
/// capability. Object-safe so sessions can run against a test double.
#[async_trait]
pub trait CourseGenerator: Send + Sync {
    /// Generate a full course outline from a seed.
    async fn generate_outline(
        &self,
        seed: &CourseSeed,
        strategy: GroundingStrategy,
    ) -> Result<Course, GenerationError>;

    /// Generate lesson text and a quiz, framed by the learner's proficiency.
    async fn generate_lesson_content(
        &self,
        lesson_title: &str,
        course_title: &str,
        proficiency: Proficiency,
    ) -> Result<LessonMaterial, GenerationError>;

    /// Answer a question strictly from the given lesson text.
    async fn ask_about_lesson(
        &self,
        question: &str,
        lesson_content: &str,
    ) -> Result<String, GenerationError>;
}

//
// ─── GENERATION SERVICE ────────────────────────────────────────────────────────
//

/// Gateway implementation over the REST client.
///
/// All validation happens here: a reply either normalizes into a complete
/// typed value or the whole operation fails. No partial course or partial
/// quiz is ever surfaced.
#[derive(Clone)]
pub struct GenerationService {
    client: GenAiClient,
    clock: Clock,
}

impl GenerationService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenAiClient::from_env())
    }

    #[must_use]
    pub fn new(client: GenAiClient) -> Self {
        Self {
            client,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate a parsed outline and assemble the final course, stamping
    /// `created_at` from the service clock.
    fn assemble_course(
        &self,
        draft: OutlineDraft,
        sources: Vec<GroundingSource>,
    ) -> Result<Course, GenerationError> {
        Ok(draft.validate()?.assemble(sources, self.clock.now()))
    }
}

#[async_trait]
impl CourseGenerator for GenerationService {
    async fn generate_outline(
        &self,
        seed: &CourseSeed,
        strategy: GroundingStrategy,
    ) -> Result<Course, GenerationError> {
        let request = build_outline_request(seed, strategy);
        let reply = self.client.generate(request).await?;
        let (text, citations) = reply.into_text()?;

        let (draft, sources) = match strategy {
            GroundingStrategy::Grounded => {
                (parse_grounded_outline(&text)?, citations_to_sources(citations))
            }
            GroundingStrategy::Strict | GroundingStrategy::General => {
                (parse_outline(text.trim())?, Vec::new())
            }
        };

        self.assemble_course(draft, sources)
    }

    async fn generate_lesson_content(
        &self,
        lesson_title: &str,
        course_title: &str,
        proficiency: Proficiency,
    ) -> Result<LessonMaterial, GenerationError> {
        let request = GenerateRequest {
            prompt: prompts::lesson_prompt(lesson_title, course_title, proficiency),
            attachment: None,
            response_schema: Some(schema::lesson_schema()),
            web_search: false,
        };
        let reply = self.client.generate(request).await?;
        let (text, _) = reply.into_text()?;
        parse_lesson(text.trim())
    }

    async fn ask_about_lesson(
        &self,
        question: &str,
        lesson_content: &str,
    ) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            prompt: prompts::qa_prompt(question, lesson_content),
            attachment: None,
            response_schema: None,
            web_search: false,
        };
        let reply = self.client.generate(request).await?;
        // An empty answer is a degraded outcome, not an error.
        Ok(reply.text.unwrap_or_default())
    }
}

//
// ─── REQUEST ASSEMBLY ──────────────────────────────────────────────────────────
//

/// Build the outline request for a seed and strategy.
///
/// Strict/General declare the strict course schema and never search;
/// Grounded searches and leaves the reply free-form.
#[must_use]
pub fn build_outline_request(seed: &CourseSeed, strategy: GroundingStrategy) -> GenerateRequest {
    let attachment = match seed {
        CourseSeed::Text(_) => None,
        CourseSeed::Document { data, media_type } => Some(Attachment {
            data: data.clone(),
            media_type: media_type.clone(),
        }),
    };
    let grounded = strategy == GroundingStrategy::Grounded;

    GenerateRequest {
        prompt: prompts::outline_prompt(seed, strategy),
        attachment,
        response_schema: (!grounded).then(schema::course_schema),
        web_search: grounded,
    }
}

fn citations_to_sources(citations: Vec<WebCitation>) -> Vec<GroundingSource> {
    citations
        .into_iter()
        .filter_map(|citation| {
            let uri = citation.uri?;
            GroundingSource::new(uri, citation.title).ok()
        })
        .collect()
}

//
// ─── RESPONSE PARSING ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawOutline {
    title: String,
    description: String,
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    title: String,
    #[serde(default)]
    lessons: Vec<RawLessonTitle>,
}

#[derive(Debug, Deserialize)]
struct RawLessonTitle {
    title: String,
}

/// Grounded replies are free text; the outline lives in the first fenced
/// json block. A reply without one is a parse failure.
fn parse_grounded_outline(text: &str) -> Result<OutlineDraft, GenerationError> {
    let block = extract::fenced_json(text).ok_or(GenerationError::MissingJsonBlock)?;
    parse_outline(block)
}

fn parse_outline(text: &str) -> Result<OutlineDraft, GenerationError> {
    let raw: RawOutline = serde_json::from_str(text)?;
    Ok(OutlineDraft {
        title: raw.title,
        description: raw.description,
        sections: raw
            .sections
            .into_iter()
            .map(|section| SectionDraft {
                title: section.title,
                lessons: section.lessons.into_iter().map(|l| l.title).collect(),
            })
            .collect(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLesson {
    lesson_part: String,
    #[serde(default)]
    quiz: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
}

fn parse_lesson(text: &str) -> Result<LessonMaterial, GenerationError> {
    let raw: RawLesson = serde_json::from_str(text)?;
    if raw.lesson_part.trim().is_empty() {
        return Err(GenerationError::EmptyLessonContent);
    }
    if raw.quiz.is_empty() {
        return Err(GenerationError::EmptyQuiz);
    }

    let mut quiz = Vec::with_capacity(raw.quiz.len());
    for question in raw.quiz {
        let draft = QuizQuestionDraft {
            question: question.question,
            options: question.options,
            correct_answer: question.correct_answer,
        };
        quiz.push(draft.validate()?.assign_id(QuestionId::mint()));
    }

    Ok(LessonMaterial {
        content: raw.lesson_part,
        quiz,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
