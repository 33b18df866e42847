#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use persona_core::model::{
    AnswerRecord, ComprehensiveReport, LatestSession, Question, QuestionId, QuestionOptions,
    SessionId, SessionInfo, SessionStatus, SubmissionReceipt, TestType, UserId,
};
use services::api::{AnswerSubmission, AssessmentApi, StatusCode, TestTypeCatalog};
use services::error::ApiError;

/// Scripted `AssessmentApi` that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub questions: Mutex<Vec<Question>>,
    pub fail_questions: Mutex<bool>,
    pub fail_create_session: Mutex<bool>,
    pub fail_submit: Mutex<bool>,
    pub latest: Mutex<LatestSession>,
    /// `None` answers 404.
    pub report: Mutex<Option<ComprehensiveReport>>,
    pub report_status: Mutex<Option<StatusCode>>,
    pub submissions: Mutex<Vec<AnswerSubmission>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_questions(count: u32) -> Self {
        let api = Self::default();
        *api.questions.lock().unwrap() = (1..=count).map(question).collect();
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn server_error() -> ApiError {
        ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

pub fn question(id: u32) -> Question {
    Question {
        id: QuestionId::new(id),
        text: format!("Question {id}"),
        category: "E-I".into(),
        test_type: "MBTI".into(),
        options: QuestionOptions::List(vec!["A".into(), "B".into()]),
        weight: Value::Null,
    }
}

pub fn report(detailed_analysis: Value) -> ComprehensiveReport {
    serde_json::from_value(json!({
        "user_id": "user_fake",
        "report_generated_at": "2024-05-01T10:00:00",
        "detailed_analysis": detailed_analysis,
    }))
    .unwrap()
}

#[async_trait]
impl AssessmentApi for FakeApi {
    async fn questions(
        &self,
        test_type: TestType,
        random: bool,
    ) -> Result<Vec<Question>, ApiError> {
        self.record(format!("questions:{}:{random}", test_type.slug()));
        if *self.fail_questions.lock().unwrap() {
            return Err(Self::server_error());
        }
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn questions_batch(&self, ids: &[QuestionId]) -> Result<Vec<Question>, ApiError> {
        self.record("questions_batch");
        Ok(ids.iter().map(|id| question(id.value())).collect())
    }

    async fn test_types(&self) -> Result<TestTypeCatalog, ApiError> {
        self.record("test_types");
        Ok(TestTypeCatalog::default())
    }

    async fn create_session(
        &self,
        _user_id: &UserId,
        _test_type: TestType,
        question_ids: Option<&[QuestionId]>,
    ) -> Result<SessionInfo, ApiError> {
        let ids = question_ids.map(<[QuestionId]>::to_vec).unwrap_or_default();
        self.record(format!("create_session:{}", ids.len()));
        if *self.fail_create_session.lock().unwrap() {
            return Err(Self::server_error());
        }
        Ok(SessionInfo {
            session_id: SessionId::new(501),
            total_questions: u32::try_from(ids.len()).unwrap(),
            question_ids: ids,
            status: SessionStatus::InProgress,
            message: None,
        })
    }

    async fn latest_session(
        &self,
        _user_id: &UserId,
        _test_type: TestType,
    ) -> Result<LatestSession, ApiError> {
        self.record("latest_session");
        Ok(self.latest.lock().unwrap().clone())
    }

    async fn pause_session(
        &self,
        session_id: SessionId,
        elapsed_seconds: Option<u64>,
    ) -> Result<Value, ApiError> {
        self.record(format!("pause:{session_id}:{elapsed_seconds:?}"));
        Ok(json!({"status": "paused"}))
    }

    async fn resume_session(&self, session_id: SessionId) -> Result<Value, ApiError> {
        self.record(format!("resume:{session_id}"));
        Ok(json!({"status": "in_progress"}))
    }

    async fn update_session_time(
        &self,
        session_id: SessionId,
        elapsed_seconds: u64,
    ) -> Result<Value, ApiError> {
        self.record(format!("update_time:{session_id}:{elapsed_seconds}"));
        Ok(json!({}))
    }

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.record("submit");
        if *self.fail_submit.lock().unwrap() {
            return Err(Self::server_error());
        }
        self.submissions.lock().unwrap().push(submission.clone());
        let answered = u32::try_from(submission.answers.len()).unwrap();
        Ok(SubmissionReceipt {
            total_questions: answered,
            answered_questions: answered,
            completion_rate: 100.0,
            message: Some("ok".into()),
        })
    }

    async fn user_answers(
        &self,
        _user_id: &UserId,
        _test_type: Option<TestType>,
    ) -> Result<Vec<AnswerRecord>, ApiError> {
        self.record("user_answers");
        Ok(Vec::new())
    }

    async fn comprehensive_report(
        &self,
        user_id: &UserId,
    ) -> Result<ComprehensiveReport, ApiError> {
        self.record("report");
        if let Some(status) = *self.report_status.lock().unwrap() {
            return Err(ApiError::HttpStatus(status));
        }
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("/api/v1/reports/{user_id}")))
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.record("health");
        Ok(json!({"status": "healthy"}))
    }
}
