use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use course_core::model::{
    Course, CourseSeed, GroundingStrategy, LessonStatus, OutlineDraft, Proficiency, QuestionId,
    QuizQuestionDraft, SectionDraft,
};
use course_core::time::fixed_now;
use services::{CourseGenerator, CourseSession, GenerationError, LessonMaterial, Screen};

struct ScriptedGenerator;

#[async_trait]
impl CourseGenerator for ScriptedGenerator {
    async fn generate_outline(
        &self,
        _seed: &CourseSeed,
        _strategy: GroundingStrategy,
    ) -> Result<Course, GenerationError> {
        let draft = OutlineDraft {
            title: "Smoke Course".into(),
            description: "End-to-end progression.".into(),
            sections: vec![
                SectionDraft {
                    title: "Opening".into(),
                    lessons: vec!["First steps".into(), "Second steps".into()],
                },
                SectionDraft {
                    title: "Closing".into(),
                    lessons: vec!["Wrap up".into()],
                },
            ],
        };
        Ok(draft.validate().unwrap().assemble(Vec::new(), fixed_now()))
    }

    async fn generate_lesson_content(
        &self,
        lesson_title: &str,
        _course_title: &str,
        _proficiency: Proficiency,
    ) -> Result<LessonMaterial, GenerationError> {
        let quiz = vec![
            QuizQuestionDraft {
                question: format!("Apply the idea from \"{lesson_title}\"."),
                options: vec!["right".into(), "wrong".into()],
                correct_answer: "right".into(),
            },
            QuizQuestionDraft {
                question: "A second check.".into(),
                options: vec!["yes".into(), "no".into()],
                correct_answer: "yes".into(),
            },
        ];
        Ok(LessonMaterial {
            content: format!("All about {lesson_title}, with an example."),
            quiz: quiz
                .into_iter()
                .map(|q| q.validate().unwrap().assign_id(QuestionId::mint()))
                .collect(),
        })
    }

    async fn ask_about_lesson(
        &self,
        _question: &str,
        lesson_content: &str,
    ) -> Result<String, GenerationError> {
        Ok(format!("Per the lesson: {lesson_content}"))
    }
}

#[tokio::test]
async fn full_course_progression_flow() {
    let mut session = CourseSession::new(Arc::new(ScriptedGenerator));
    let seed = CourseSeed::from_text("a topic worth teaching").unwrap();

    session.create_course(&seed, GroundingStrategy::Strict).await;
    assert_eq!(session.screen(), Screen::Course);
    let first_id = {
        let course = session.course().expect("course stored");
        let frontier: Vec<_> = course
            .lessons()
            .filter(|l| l.status() == LessonStatus::Unlocked)
            .collect();
        assert_eq!(frontier.len(), 1);
        frontier[0].id().clone()
    };

    // Visit the frontier lesson and study it.
    session.select_lesson(&first_id).await;
    let active = session.active_lesson().expect("lesson active");
    assert!(active.has_content());
    session.send_message("Can you summarize?").await;
    assert_eq!(session.chat().len(), 2);

    // Answer one of two questions: exactly half, so struggling.
    let answers: HashMap<_, _> = {
        let quiz = session.active_lesson().unwrap().quiz().unwrap();
        vec![
            (quiz[0].id().clone(), quiz[0].correct_answer().to_string()),
            (quiz[1].id().clone(), "no".to_string()),
        ]
        .into_iter()
        .collect()
    };
    session.submit_quiz(&answers);
    assert_eq!(session.proficiency_of(&first_id), Proficiency::Struggling);
    assert_eq!(
        session.active_lesson().unwrap().status(),
        LessonStatus::Completed
    );

    // The pointer moved the frontier forward; follow it to the end.
    session.go_to_next_lesson().await;
    assert!(session.chat().is_empty());
    let second_id = session.active_lesson().unwrap().id().clone();
    assert_ne!(second_id, first_id);

    let perfect: HashMap<_, _> = session
        .active_lesson()
        .unwrap()
        .quiz()
        .unwrap()
        .iter()
        .map(|q| (q.id().clone(), q.correct_answer().to_string()))
        .collect();
    session.submit_quiz(&perfect);
    assert_eq!(session.proficiency_of(&second_id), Proficiency::Mastered);

    session.go_to_next_lesson().await;
    let last_id = session.active_lesson().unwrap().id().clone();
    let perfect: HashMap<_, _> = session
        .active_lesson()
        .unwrap()
        .quiz()
        .unwrap()
        .iter()
        .map(|q| (q.id().clone(), q.correct_answer().to_string()))
        .collect();
    session.submit_quiz(&perfect);
    assert!(session.next_lesson_id().is_none());
    assert_eq!(session.proficiency_of(&last_id), Proficiency::Mastered);

    // Every lesson visited is now completed.
    assert!(
        session
            .course()
            .unwrap()
            .lessons()
            .all(|l| l.status() == LessonStatus::Completed)
    );

    session.clear_course();
    assert_eq!(session.screen(), Screen::Creation);
    assert!(session.course().is_none());
}
