use serde_json::json;

use persona_core::model::{TestType, UserId};
use services::PROGRESS_KEY;
use storage::repository::InMemoryKeyValueStore;

use super::test_harness::{StubApi, ViewKind, setup_view_harness, setup_view_harness_with_store};

fn saved_progress(raw: &'static str) -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::with_entries([(PROGRESS_KEY, raw)])
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_every_framework() {
    let mut harness = setup_view_harness(ViewKind::Home, StubApi::default()).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    for title in [
        "MBTI Personality Type",
        "DISC Behaviour Style",
        "Big Five Traits",
        "Enneagram",
    ] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("Start test"), "missing start action in {html}");
    assert!(html.contains("Respondent: user_"), "missing respondent in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_marks_ongoing_test() {
    let kv = saved_progress(
        r#"{"currentTest":"disc","currentQuestion":2,"answers":{"1":"D","2":"I","3":"S"},
            "isCompleted":false,"userId":"user_prev","totalQuestions":24,"startTime":1700000000000}"#,
    );
    let mut harness = setup_view_harness_with_store(ViewKind::Home, StubApi::default(), kv).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Continue test"), "missing continue in {html}");
    assert!(html.contains("In progress"), "missing badge in {html}");
    // Home progress is measured against 30 questions.
    assert!(html.contains("10% complete"), "missing percentage in {html}");
    assert!(html.contains("Started 2023-11-14"), "missing start time in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_starts_quiz() {
    let mut harness =
        setup_view_harness(ViewKind::Quiz(TestType::Mbti), StubApi::with_questions(3)).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Statement number 1"), "missing question in {html}");
    assert!(html.contains("Agree"), "missing choice in {html}");
    assert!(html.contains("Answered 0 / 3"), "missing answered count in {html}");

    let state = harness.services.progress().snapshot().await;
    assert_eq!(state.current_test(), Some(TestType::Mbti));
    assert_eq!(state.total_questions(), 3);
    assert!(harness.kv.peek(PROGRESS_KEY).is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resumes_saved_position() {
    let kv = saved_progress(
        r#"{"currentTest":"mbti","currentQuestion":1,"answers":{"1":"Agree"},
            "isCompleted":false,"userId":"user_prev","totalQuestions":3,"startTime":1700000000000}"#,
    );
    let mut harness =
        setup_view_harness_with_store(ViewKind::Quiz(TestType::Mbti), StubApi::with_questions(3), kv)
            .await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "missing position in {html}");
    assert!(html.contains("Answered 1 / 3"), "missing answered count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_offers_retry_when_questions_fail() {
    let api = StubApi::with_questions(3);
    *api.fail_questions.lock().unwrap() = true;
    let mut harness = setup_view_harness(ViewKind::Quiz(TestType::Big5), api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Could not reach the assessment service"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert_eq!(harness.kv.peek(PROGRESS_KEY), None);
}

#[tokio::test(flavor = "current_thread")]
async fn report_view_smoke_renders_scores() {
    let api = StubApi::default();
    api.set_report(json!({
        "mbti": {
            "scores": {"E": 7.5, "I": 2.5, "S": 4, "N": 6, "T": 5, "F": 5, "J": 8, "P": 2},
            "personality_type": "ENTJ",
            "strengths": ["Decisive planner"]
        }
    }));
    let mut harness = setup_view_harness(
        ViewKind::Report(UserId::new("user_view"), TestType::Mbti),
        api,
    )
    .await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Your type: ENTJ"), "missing type in {html}");
    assert!(html.contains("Extraversion (E)"), "missing trait label in {html}");
    assert!(html.contains("7.5"), "missing score in {html}");
    assert!(html.contains("Very high"), "missing level in {html}");
    assert!(html.contains("Decisive planner"), "missing strengths in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn report_view_smoke_explains_unfinished_test() {
    let mut harness = setup_view_harness(
        ViewKind::Report(UserId::new("user_view"), TestType::Disc),
        StubApi::default(),
    )
    .await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("This test has not been completed yet."),
        "missing message in {html}"
    );
    assert!(html.contains("Take the test"), "missing action in {html}");
    assert!(!html.contains("Retry"), "unexpected retry in {html}");
}
