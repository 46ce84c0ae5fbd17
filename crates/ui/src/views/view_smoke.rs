use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Duration;
use quiz_core::model::{Category, OptionKey, QuizSettings};
use storage::repository::{InMemorySource, QuestionRecord, QuestionSource, StorageError};

use super::test_harness::{setup_view_harness, setup_view_harness_with};
use crate::vm::QuizIntent;

fn record(n: usize) -> QuestionRecord {
    QuestionRecord {
        question: format!("Sample question {n}"),
        options: BTreeMap::from([
            ("A".to_string(), "Observe and report".to_string()),
            ("B".to_string(), "Use force".to_string()),
        ]),
        correct: "A".to_string(),
        explanation: "Guards observe and report".to_string(),
    }
}

fn source_with(category: Category, size: usize) -> InMemorySource {
    let source = InMemorySource::with_empty_banks();
    source.insert_bank(category, (0..size).map(record).collect());
    source
}

#[tokio::test(flavor = "current_thread")]
async fn category_picker_renders_after_load() {
    let mut harness = setup_view_harness(source_with(Category::AccessControl, 3));
    harness.start().await;

    let html = harness.render();
    assert!(!html.contains("Loading questions..."), "still loading in {html}");
    assert!(html.contains("Access Control"), "missing category in {html}");
    assert!(html.contains("3 questions"), "missing bank size in {html}");
    assert!(html.contains("Start Mock Exam"), "missing mock exam button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn load_failure_renders_notice() {
    let source = InMemorySource::with_empty_banks();
    source.remove_bank(Category::EmergencySituations);
    let mut harness = setup_view_harness(source);
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Could not load questions."), "missing failure title in {html}");
    assert!(html.contains("emergency_situations.json"), "missing failure detail in {html}");
    assert!(!html.contains("questions</span>"), "bank sizes shown after failure in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn category_quiz_runs_to_review() {
    let mut harness = setup_view_harness(source_with(Category::AccessControl, 3));
    harness.start().await;

    harness.dispatch(QuizIntent::StartCategory(Category::AccessControl));
    let html = harness.render();
    assert!(html.contains("1 of 3"), "missing progress in {html}");
    assert!(html.contains("A. Observe and report"), "missing option in {html}");
    assert!(html.contains("Next Question"), "missing next button in {html}");

    harness.dispatch(QuizIntent::Pick(OptionKey::from("B")));
    let html = harness.render();
    assert!(html.contains("option-btn incorrect"), "pick not marked in {html}");
    assert!(html.contains("option-btn correct"), "correct option not shown in {html}");

    harness.dispatch(QuizIntent::Advance);
    harness.dispatch(QuizIntent::Pick(OptionKey::from("A")));
    harness.dispatch(QuizIntent::Advance);
    harness.dispatch(QuizIntent::Advance);

    let html = harness.render();
    assert!(html.contains("33%"), "missing percent in {html}");
    assert!(html.contains("Not Passed"), "missing verdict in {html}");
    assert!(html.contains("1 of 3 correct"), "missing detail in {html}");

    harness.dispatch(QuizIntent::Review);
    let html = harness.render();
    assert!(html.contains("Review Answers"), "missing review title in {html}");
    assert!(html.contains("Did not answer"), "missing skipped answer in {html}");
    assert!(html.contains("Guards observe and report"), "missing explanation in {html}");

    harness.dispatch(QuizIntent::BackToCategories);
    let html = harness.render();
    assert!(html.contains("Choose a category"), "not back on picker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_category_shows_notice() {
    let mut harness = setup_view_harness(source_with(Category::AccessControl, 3));
    harness.start().await;

    harness.dispatch(QuizIntent::StartCategory(Category::EthicsConduct));
    let html = harness.render();
    assert!(html.contains("No questions yet for this category."), "missing notice in {html}");
    assert!(html.contains("ethics_conduct.json"), "missing file hint in {html}");

    harness.dispatch(QuizIntent::BackToCategories);
    harness.dispatch(QuizIntent::StartCategory(Category::AccessControl));
    let html = harness.render();
    assert!(html.contains("1 of 3"), "other category blocked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mock_exam_countdown_expires_to_results() {
    let settings = QuizSettings::new(25, 5, 120, 70).unwrap();
    let mut harness =
        setup_view_harness_with(Arc::new(source_with(Category::AccessControl, 10)), settings);
    harness.start().await;

    harness.dispatch(QuizIntent::StartMock);
    let html = harness.render();
    assert!(html.contains("2:00"), "missing countdown in {html}");
    assert!(html.contains("1 of 5"), "missing progress in {html}");

    harness.with_vm(|vm| {
        vm.clock_mut().advance(Duration::seconds(45));
        vm.tick();
    });
    let html = harness.render();
    assert!(html.contains("1:15"), "countdown not updated in {html}");

    harness.with_vm(|vm| {
        vm.clock_mut().advance(Duration::seconds(75));
        vm.tick();
    });
    let html = harness.render();
    assert!(html.contains("Time expired"), "missing expiry note in {html}");
    assert!(html.contains("0 of 5 correct"), "missing detail in {html}");
    assert!(!harness.with_vm(|vm| vm.timer_active()));
}

struct MalformedSource;

#[async_trait::async_trait]
impl QuestionSource for MalformedSource {
    async fn fetch_bank(&self, _category: Category) -> Result<Vec<QuestionRecord>, StorageError> {
        Err(StorageError::Serialization("expected a JSON array".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_bank_keeps_quizzes_disabled() {
    let mut harness = setup_view_harness_with(Arc::new(MalformedSource), QuizSettings::default());
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Could not load questions."), "missing failure title in {html}");
    assert!(html.contains("expected a JSON array"), "missing failure detail in {html}");

    harness.dispatch(QuizIntent::StartMock);
    let html = harness.render();
    assert!(html.contains("could not be loaded"), "missing rejection message in {html}");
    assert!(!html.contains("Next Question"), "quiz started after failed load in {html}");
}
