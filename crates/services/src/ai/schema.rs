//! Strict response schemas declared on Strict/General outline requests and
//! every lesson-content request. The grounded path sends no schema; its
//! reply is free text with an embedded fenced JSON block.

use serde_json::{Value, json};

/// Schema for a course outline: title, description, and ordered sections
/// each holding ordered lesson titles.
#[must_use]
pub fn course_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A concise, engaging title for the course. Should be based on the provided content."
            },
            "description": {
                "type": "STRING",
                "description": "A brief, one-sentence description of what the course is about."
            },
            "sections": {
                "type": "ARRAY",
                "description": "A list of logical sections that break down the main topic.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "The title of this course section." },
                        "lessons": {
                            "type": "ARRAY",
                            "description": "A list of lessons within this section.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": { "type": "STRING", "description": "The title of this individual lesson." }
                                },
                                "required": ["title"]
                            }
                        }
                    },
                    "required": ["title", "lessons"]
                }
            }
        },
        "required": ["title", "description", "sections"]
    })
}

/// Schema for lesson material: the lesson text plus a small
/// application-based quiz.
#[must_use]
pub fn lesson_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "lessonPart": {
                "type": "STRING",
                "description": "The educational text for the lesson, between 150 and 250 words. It MUST include a concrete, real-world, applicative example of the concept."
            },
            "quiz": {
                "type": "ARRAY",
                "description": "A list of 2 multiple-choice quiz questions designed to test the application of the lesson's concepts. At least one question should be based on the real-world example provided in the lessonPart.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING", "description": "The application-based question text." },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "An array of 4 possible answers."
                        },
                        "correctAnswer": { "type": "STRING", "description": "The correct answer from the options list." }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["lessonPart", "quiz"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_schema_requires_outline_fields() {
        let schema = course_schema();
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, ["title", "description", "sections"]);
        assert_eq!(
            schema["properties"]["sections"]["items"]["required"][1],
            "lessons"
        );
    }

    #[test]
    fn lesson_schema_requires_content_and_quiz() {
        let schema = lesson_schema();
        assert_eq!(schema["required"][0], "lessonPart");
        assert_eq!(schema["required"][1], "quiz");
        let question = &schema["properties"]["quiz"]["items"];
        assert_eq!(question["required"][2], "correctAnswer");
    }
}
