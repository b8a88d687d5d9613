//! End-to-end engine tests: built-in content, memory store, and the
//! validator-preferred / local-fallback scoring paths.

use std::sync::Arc;
use std::time::Duration;

use learnstep_core::engine::{
    AssessmentEngine, EngineConfig, SubmittedAnswer, ValidatedBy,
};
use learnstep_core::model::{AgeGroup, Difficulty, ExpectedAnswer, Level, Subject};
use learnstep_core::traits::{Capture, CompletionStore, RemoteValidator, ValidateResponse};

use learnstep_content::BuiltinContent;
use learnstep_store::http::HttpValidator;
use learnstep_store::memory::MemoryStore;
use learnstep_store::mock::{MockRecognizer, MockValidator};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(store: Arc<MemoryStore>) -> AssessmentEngine {
    AssessmentEngine::new(Arc::new(BuiltinContent), store, EngineConfig::default())
}

fn correct_answers(questions: &[learnstep_core::model::AssessmentQuestion]) -> Vec<SubmittedAnswer> {
    questions
        .iter()
        .map(|q| SubmittedAnswer::Typed(q.expected.to_string()))
        .collect()
}

#[tokio::test]
async fn local_scoring_persists_a_record() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store.clone());

    let questions = engine
        .begin("child-1", Subject::Addition, AgeGroup::Seven)
        .unwrap();
    assert_eq!(questions.len(), 20);

    let outcome = engine
        .submit(
            "child-1",
            Subject::Addition,
            AgeGroup::Seven,
            &questions,
            correct_answers(&questions),
        )
        .await;

    assert_eq!(outcome.summary.percentage, 100);
    assert_eq!(outcome.validated_by, ValidatedBy::Local);
    assert!(outcome.saved);
    // 100% is above the stretch threshold: one age group up at medium.
    assert_eq!(outcome.assignment.age_group, AgeGroup::Eight);
    assert_eq!(outcome.assignment.level.get(), 8);

    let record = store
        .assessment("child-1", Subject::Addition)
        .await
        .unwrap()
        .unwrap();
    assert!(record.taken);
    assert_eq!(record.score, Some(100));
    assert_eq!(record.level, Level::new(8));
}

#[tokio::test]
async fn remote_validator_is_authoritative() {
    let store = Arc::new(MemoryStore::new());
    let remote = ValidateResponse {
        correct: 6,
        total: 20,
        score: 30,
        level: Level::new(6).unwrap(),
        age_group: AgeGroup::Seven,
        difficulty: Difficulty::Medium,
        reason: "Score 30-75% - assigned age-appropriate content".to_string(),
        feedback: vec![],
    };
    let validator = Arc::new(MockValidator::with_assessment_response(remote));
    let engine = engine(store.clone()).with_validator(validator.clone());

    let questions = engine
        .begin("child-1", Subject::Addition, AgeGroup::Seven)
        .unwrap();
    // Answer everything correctly; the (tampering-proof) remote score
    // must still win.
    let outcome = engine
        .submit(
            "child-1",
            Subject::Addition,
            AgeGroup::Seven,
            &questions,
            correct_answers(&questions),
        )
        .await;

    assert_eq!(outcome.validated_by, ValidatedBy::Remote);
    assert_eq!(outcome.summary.percentage, 30);
    assert_eq!(outcome.assignment.level.get(), 6);
    assert_eq!(validator.call_count(), 1);

    // The raw answers were relayed for server-side grading.
    let relayed = validator.last_request().unwrap();
    assert_eq!(relayed.answers.len(), questions.len());

    let record = store
        .assessment("child-1", Subject::Addition)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.score, Some(30));
}

#[tokio::test]
async fn validator_failure_falls_back_to_local() {
    let store = Arc::new(MemoryStore::new());
    let validator = Arc::new(MockValidator::failing());
    let engine = engine(store.clone()).with_validator(validator.clone());

    let questions = engine
        .begin("child-1", Subject::Subtraction, AgeGroup::Six)
        .unwrap();
    let outcome = engine
        .submit(
            "child-1",
            Subject::Subtraction,
            AgeGroup::Six,
            &questions,
            correct_answers(&questions),
        )
        .await;

    assert_eq!(validator.call_count(), 1);
    assert_eq!(outcome.validated_by, ValidatedBy::Local);
    assert_eq!(outcome.summary.percentage, 100);
    assert!(outcome.saved);
}

#[tokio::test]
async fn seeded_questions_are_stable_when_a_validator_is_attached() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store).with_validator(Arc::new(MockValidator::failing()));

    let first = engine
        .begin("child-7", Subject::Division, AgeGroup::Eight)
        .unwrap();
    let second = engine
        .begin("child-7", Subject::Division, AgeGroup::Eight)
        .unwrap();

    let prompts: Vec<_> = first.iter().map(|q| q.prompt.clone()).collect();
    let prompts_again: Vec<_> = second.iter().map(|q| q.prompt.clone()).collect();
    assert_eq!(prompts, prompts_again);
}

#[tokio::test]
async fn storage_outage_still_produces_a_result() {
    let store = Arc::new(MemoryStore::new());
    store.set_unavailable(true);
    let engine = engine(store.clone());

    let questions = engine
        .begin("child-1", Subject::English, AgeGroup::Six)
        .unwrap();
    let outcome = engine
        .submit(
            "child-1",
            Subject::English,
            AgeGroup::Six,
            &questions,
            correct_answers(&questions),
        )
        .await;

    assert_eq!(outcome.summary.percentage, 100);
    assert!(!outcome.saved, "a failed save must not claim success");
}

#[tokio::test]
async fn handwritten_answers_go_through_the_recognizer() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store);

    let questions = engine
        .begin("child-1", Subject::Addition, AgeGroup::FourToFive)
        .unwrap();

    // Recognize the right answer for every question, in order.
    let values: Vec<String> = questions.iter().map(|q| q.expected.to_string()).collect();
    let recognizer = Arc::new(MockRecognizer::returning(values));
    let engine = engine.with_recognizer(recognizer.clone());

    let capture = || Capture {
        pixels: vec![0; 64],
        width: 8,
        height: 8,
    };
    let answers = questions
        .iter()
        .map(|_| SubmittedAnswer::Handwritten(capture()))
        .collect();

    let outcome = engine
        .submit(
            "child-1",
            Subject::Addition,
            AgeGroup::FourToFive,
            &questions,
            answers,
        )
        .await;

    assert_eq!(recognizer.call_count() as usize, questions.len());
    assert_eq!(outcome.summary.percentage, 100);
}

#[tokio::test]
async fn handwriting_without_a_recognizer_grades_blank() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store);

    let questions = engine
        .begin("child-1", Subject::Addition, AgeGroup::FourToFive)
        .unwrap();
    let answers = questions
        .iter()
        .map(|_| {
            SubmittedAnswer::Handwritten(Capture {
                pixels: vec![0; 64],
                width: 8,
                height: 8,
            })
        })
        .collect();

    let outcome = engine
        .submit(
            "child-1",
            Subject::Addition,
            AgeGroup::FourToFive,
            &questions,
            answers,
        )
        .await;

    assert_eq!(outcome.summary.percentage, 0);
    assert_eq!(outcome.summary.correct_count, 0);
}

#[tokio::test]
async fn http_validator_end_to_end_with_fallback() {
    let server = MockServer::start().await;
    let response_body = serde_json::json!({
        "correct": 19,
        "total": 20,
        "score": 95,
        "level": 10,
        "age_group": "9+",
        "difficulty": "medium",
        "reason": "Score above 75% - assigned advanced content for challenge",
        "feedback": []
    });
    Mock::given(method("POST"))
        .and(path("/v1/assessments:submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let validator: Arc<dyn RemoteValidator> = Arc::new(HttpValidator::with_timeout(
        &server.uri(),
        Duration::from_secs(2),
    ));
    let engine = engine(store).with_validator(validator);

    let questions = engine
        .begin("child-1", Subject::Multiplication, AgeGroup::NinePlus)
        .unwrap();
    let answers = correct_answers(&questions);

    // First submission hits the mock server.
    let remote = engine
        .submit(
            "child-1",
            Subject::Multiplication,
            AgeGroup::NinePlus,
            &questions,
            answers.clone(),
        )
        .await;
    assert_eq!(remote.validated_by, ValidatedBy::Remote);
    assert_eq!(remote.summary.percentage, 95);
    assert_eq!(remote.assignment.level.get(), 10);

    // The mock only answers once; the retake must fall back to local
    // scoring with the same output shape.
    let local = engine
        .submit(
            "child-1",
            Subject::Multiplication,
            AgeGroup::NinePlus,
            &questions,
            answers,
        )
        .await;
    assert_eq!(local.validated_by, ValidatedBy::Local);
    assert_eq!(local.summary.percentage, 100);
}

#[tokio::test]
async fn retake_overwrites_the_assessment_record() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store.clone());

    let questions = engine
        .begin("child-1", Subject::Addition, AgeGroup::Seven)
        .unwrap();

    // First attempt: everything blank.
    let blank: Vec<SubmittedAnswer> = questions
        .iter()
        .map(|_| SubmittedAnswer::Typed(String::new()))
        .collect();
    let first = engine
        .submit("child-1", Subject::Addition, AgeGroup::Seven, &questions, blank)
        .await;
    assert_eq!(first.summary.percentage, 0);

    // Retake: all correct. The stored record must hold only the retake.
    let second = engine
        .submit(
            "child-1",
            Subject::Addition,
            AgeGroup::Seven,
            &questions,
            correct_answers(&questions),
        )
        .await;
    assert_eq!(second.summary.percentage, 100);

    let record = store
        .assessment("child-1", Subject::Addition)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.score, Some(100));
    assert_eq!(record.level, Level::new(8));
}

#[tokio::test]
async fn mixed_expected_answer_kinds_grade_from_text() {
    // Ages 10+ hard division produces fraction answers (strings); typed
    // input must grade against them without numeric coercion errors.
    let store = Arc::new(MemoryStore::new());
    let engine = engine(store);

    let questions = engine
        .begin("child-1", Subject::Division, AgeGroup::TenPlus)
        .unwrap();
    assert!(questions
        .iter()
        .any(|q| matches!(q.expected, ExpectedAnswer::Text(_))));

    let outcome = engine
        .submit(
            "child-1",
            Subject::Division,
            AgeGroup::TenPlus,
            &questions,
            correct_answers(&questions),
        )
        .await;
    assert_eq!(outcome.summary.percentage, 100);
}
