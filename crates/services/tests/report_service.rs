mod support;

use std::sync::Arc;

use serde_json::json;

use persona_core::model::{ScoreLevel, TestType, UserId};
use services::ReportService;
use services::api::StatusCode;
use services::error::{ApiError, ReportError};
use support::{FakeApi, report};

fn service(api: &Arc<FakeApi>) -> ReportService {
    ReportService::new(Arc::clone(api) as Arc<dyn services::AssessmentApi>)
}

#[tokio::test]
async fn extracts_section_with_field_fallbacks() {
    let api = Arc::new(FakeApi::default());
    *api.report.lock().unwrap() = Some(report(json!({
        "disc": {
            "scores": {"D": 8.2, "I": 6.0, "S": 3.1, "C": 4.4},
            "primary_style": "D",
            "career_matches": ["Founder", "Sales lead"],
            "interpersonal_style": "Direct",
            "strengths": ["Decisive"]
        }
    })));

    let result = service(&api)
        .report_for(&UserId::new("user_fake"), TestType::Disc)
        .await
        .unwrap();

    assert_eq!(result.personality_type.as_deref(), Some("D"));
    assert_eq!(result.career_suggestions, vec!["Founder", "Sales lead"]);
    assert_eq!(result.communication_style.as_deref(), Some("Direct"));
    assert_eq!(result.strengths, vec!["Decisive"]);
    assert_eq!(
        ScoreLevel::from_score(result.score_for("D").unwrap()),
        ScoreLevel::VeryHigh
    );
}

#[tokio::test]
async fn missing_section_means_not_completed() {
    let api = Arc::new(FakeApi::default());
    *api.report.lock().unwrap() = Some(report(json!({
        "mbti": {"scores": {"E": 6, "I": 4}}
    })));

    let err = service(&api)
        .report_for(&UserId::new("user_fake"), TestType::Big5)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::NotCompleted {
            test_type: TestType::Big5,
            ..
        }
    ));
}

#[tokio::test]
async fn section_without_scores_means_not_completed() {
    let api = Arc::new(FakeApi::default());
    *api.report.lock().unwrap() = Some(report(json!({
        "enneagram": {"primary_type": "5", "description": "Investigator"}
    })));

    let err = service(&api)
        .report_for(&UserId::new("user_fake"), TestType::Enneagram)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::NotCompleted { .. }));
}

#[tokio::test]
async fn unknown_user_means_not_completed() {
    let api = Arc::new(FakeApi::default());

    let err = service(&api)
        .report_for(&UserId::new("user_new"), TestType::Mbti)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::NotCompleted { .. }));
    assert!(err.to_string().contains("user_new"));
}

#[tokio::test]
async fn server_errors_are_surfaced() {
    let api = Arc::new(FakeApi::default());
    *api.report_status.lock().unwrap() = Some(StatusCode::BAD_GATEWAY);

    let err = service(&api)
        .report_for(&UserId::new("user_fake"), TestType::Mbti)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::Api(ApiError::HttpStatus(status)) if status == StatusCode::BAD_GATEWAY
    ));
}
