//! Question/report service access.
//!
//! `AssessmentApi` is the seam the rest of the crate talks to; the HTTP
//! implementation lives in `client`, wire-only shapes in `dto`.

use async_trait::async_trait;
use serde_json::Value;

use persona_core::model::{
    AnswerRecord, ComprehensiveReport, LatestSession, Question, QuestionId, SessionId,
    SessionInfo, SubmissionReceipt, TestType, UserId,
};

use crate::error::ApiError;

mod client;
mod dto;

pub use client::HttpAssessmentApi;
pub use dto::{AnswerSubmission, TestTypeCatalog};
pub use reqwest::StatusCode;

#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// Question set for one framework; `random` asks the service to shuffle.
    async fn questions(&self, test_type: TestType, random: bool)
    -> Result<Vec<Question>, ApiError>;

    async fn questions_batch(&self, ids: &[QuestionId]) -> Result<Vec<Question>, ApiError>;

    async fn test_types(&self) -> Result<TestTypeCatalog, ApiError>;

    async fn create_session(
        &self,
        user_id: &UserId,
        test_type: TestType,
        question_ids: Option<&[QuestionId]>,
    ) -> Result<SessionInfo, ApiError>;

    async fn latest_session(
        &self,
        user_id: &UserId,
        test_type: TestType,
    ) -> Result<LatestSession, ApiError>;

    async fn pause_session(
        &self,
        session_id: SessionId,
        elapsed_seconds: Option<u64>,
    ) -> Result<Value, ApiError>;

    async fn resume_session(&self, session_id: SessionId) -> Result<Value, ApiError>;

    async fn update_session_time(
        &self,
        session_id: SessionId,
        elapsed_seconds: u64,
    ) -> Result<Value, ApiError>;

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionReceipt, ApiError>;

    /// Stored answers, optionally narrowed to one framework.
    async fn user_answers(
        &self,
        user_id: &UserId,
        test_type: Option<TestType>,
    ) -> Result<Vec<AnswerRecord>, ApiError>;

    async fn comprehensive_report(&self, user_id: &UserId)
    -> Result<ComprehensiveReport, ApiError>;

    async fn health(&self) -> Result<Value, ApiError>;
}
