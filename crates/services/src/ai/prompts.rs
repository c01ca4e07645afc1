//! Prompt templates for the three gateway operations.
//!
//! Templates are plain string builders so they can be asserted on in tests
//! without touching the network.

use course_core::model::{CourseSeed, GroundingStrategy, Proficiency};

/// Fixed refusal phrase the Q&A prompt instructs the model to emit when the
/// lesson text does not contain the answer.
pub const QA_REFUSAL: &str = "I can't answer that based on the provided lesson material.";

/// Build the outline-generation prompt for a seed and grounding strategy.
///
/// Document seeds get a document-phrased prompt; the document itself
/// travels as a request attachment, not inside the prompt text.
#[must_use]
pub fn outline_prompt(seed: &CourseSeed, strategy: GroundingStrategy) -> String {
    match strategy {
        GroundingStrategy::Grounded => grounded_outline_prompt(seed),
        GroundingStrategy::Strict | GroundingStrategy::General => {
            schema_outline_prompt(seed, strategy)
        }
    }
}

fn schema_outline_prompt(seed: &CourseSeed, strategy: GroundingStrategy) -> String {
    let framing = match (strategy, seed.is_document()) {
        (GroundingStrategy::Strict, false) => {
            "Based *strictly* on the following content, create a structured learning course outline."
        }
        (GroundingStrategy::Strict, true) => {
            "Based *strictly* on the attached document, create a structured learning course outline."
        }
        (_, false) => {
            "Using the following content as a primary reference, and augmenting with your general knowledge on the topic, create a structured learning course outline."
        }
        (_, true) => {
            "Using the attached document as a primary reference, and augmenting with your general knowledge, create a structured learning course outline."
        }
    };

    match seed {
        CourseSeed::Text(text) => format!(
            "You are an expert instructional designer.\n\
             {framing}\n\
             Break the content down into logical sections, and each section into specific, actionable lesson topics. The structure should be easy to follow for a beginner.\n\
             \n\
             Content:\n\
             ---\n\
             {text}\n\
             ---\n\
             \n\
             Generate a course title, a short description, and the sections with their respective lesson titles."
        ),
        CourseSeed::Document { .. } => format!(
            "You are an expert instructional designer.\n\
             {framing}\n\
             Analyze the document and break its content down into logical sections, and each section into specific, actionable lesson topics. The structure should be easy to follow for a beginner.\n\
             Generate a course title, a short description, and the sections with their respective lesson titles."
        ),
    }
}

fn grounded_outline_prompt(seed: &CourseSeed) -> String {
    let instructions = "Respond with a short explanation followed by the course outline as a fenced ```json code block with this exact shape: {\"title\": string, \"description\": string, \"sections\": [{\"title\": string, \"lessons\": [{\"title\": string}]}]}.";
    match seed {
        CourseSeed::Text(text) => format!(
            "You are an expert instructional designer tasked with creating a course outline.\n\
             Use Google Search to find up-to-date and relevant information based on the user's provided content.\n\
             The user's content is:\n\
             ---\n\
             {text}\n\
             ---\n\
             Based on your search results and the provided context, generate a course outline.\n\
             {instructions}"
        ),
        CourseSeed::Document { .. } => format!(
            "You are an expert instructional designer tasked with creating a course outline.\n\
             Use Google Search to find up-to-date and relevant information based on the topic of the attached document.\n\
             Based on your search results and an analysis of the document, generate a course outline.\n\
             {instructions}"
        ),
    }
}

/// Build the lesson-content prompt, framed by the learner's proficiency.
#[must_use]
pub fn lesson_prompt(lesson_title: &str, course_title: &str, proficiency: Proficiency) -> String {
    let proficiency_instruction = match proficiency {
        Proficiency::New => "The user is new to this topic. Explain it from the basics.",
        Proficiency::Struggling => {
            "The user is struggling with this topic. Re-explain it simply, perhaps with a different analogy, and make the quiz questions slightly easier to build confidence."
        }
        Proficiency::Proficient => {
            "The user is proficient. You can be a bit more concise and dive into more detail. The quiz can be a bit more challenging."
        }
        Proficiency::Mastered => {
            "The user has mastered this. This is a review. Briefly summarize the key points."
        }
    };

    format!(
        "You are an expert teacher creating content for a lesson titled \"{lesson_title}\" within the course \"{course_title}\".\n\
         The user's proficiency is: {proficiency}. {proficiency_instruction}\n\
         \n\
         Your task is to generate a lesson part and a quiz.\n\
         \n\
         1. **Lesson Content**: Explain the core concept of \"{lesson_title}\". Your explanation MUST include a concrete, real-world or practical application example of the concept to help with understanding. Keep the total text between 150 and 250 words.\n\
         \n\
         2. **Application-Based Quiz**: Create a quiz with 2 multiple-choice questions. These questions must test the user's ability to APPLY the concept, not just recall facts. At least one question should be directly based on the practical example you provided in the lesson content."
    )
}

/// Build the Q&A prompt: answer strictly from the lesson text, with a fixed
/// refusal phrase when the text lacks the answer.
#[must_use]
pub fn qa_prompt(question: &str, lesson_content: &str) -> String {
    format!(
        "You are a helpful teaching assistant. A student is studying the following text:\n\
         ---\n\
         {lesson_content}\n\
         ---\n\
         The student asked this question: \"{question}\"\n\
         \n\
         Answer the question based *only* on the provided text. If the answer is not in the text, say \"{QA_REFUSAL}\" Keep your answer concise and helpful."
    )
}
