use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use persona_core::model::{
    AnswerRecord, ApiSettings, ComprehensiveReport, LatestSession, Question, QuestionId,
    SessionId, SessionInfo, SubmissionReceipt, TestType, UserId,
};

use super::AssessmentApi;
use super::dto::{
    AnswerList, AnswerSubmission, BatchRequest, CreateSessionRequest, ElapsedRequest,
    QuestionList, TestTypeCatalog,
};
use crate::error::ApiError;

/// `AssessmentApi` over HTTP/JSON. No retries; every failure is returned.
#[derive(Clone)]
pub struct HttpAssessmentApi {
    client: Client,
    settings: ApiSettings,
}

impl HttpAssessmentApi {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the TLS backend cannot be initialised.
    pub fn new(settings: ApiSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .build()?;
        Ok(Self { client, settings })
    }

    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        self.settings.endpoint(path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "assessment service response");

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url));
        }
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        self.send(url, request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.client.post(&url);
        self.send(url, request).await
    }
}

#[async_trait]
impl AssessmentApi for HttpAssessmentApi {
    async fn questions(
        &self,
        test_type: TestType,
        random: bool,
    ) -> Result<Vec<Question>, ApiError> {
        let url = self.url(&format!("/api/v1/questions/{}", test_type.slug()));
        let request = self.client.get(&url).query(&[("random", random)]);
        let list: QuestionList = self.send(url, request).await?;
        Ok(list.into_questions())
    }

    async fn questions_batch(&self, ids: &[QuestionId]) -> Result<Vec<Question>, ApiError> {
        let body = BatchRequest { ids };
        let list: QuestionList = self.post("/api/v1/questions/batch", &body).await?;
        Ok(list.into_questions())
    }

    async fn test_types(&self) -> Result<TestTypeCatalog, ApiError> {
        self.get("/api/v1/questions/types").await
    }

    async fn create_session(
        &self,
        user_id: &UserId,
        test_type: TestType,
        question_ids: Option<&[QuestionId]>,
    ) -> Result<SessionInfo, ApiError> {
        let body = CreateSessionRequest {
            user_id,
            test_type,
            question_ids,
        };
        self.post("/api/v1/sessions/create", &body).await
    }

    async fn latest_session(
        &self,
        user_id: &UserId,
        test_type: TestType,
    ) -> Result<LatestSession, ApiError> {
        self.get(&format!(
            "/api/v1/sessions/{user_id}/{}/latest",
            test_type.slug()
        ))
        .await
    }

    async fn pause_session(
        &self,
        session_id: SessionId,
        elapsed_seconds: Option<u64>,
    ) -> Result<Value, ApiError> {
        let path = format!("/api/v1/sessions/{session_id}/pause");
        match elapsed_seconds {
            Some(elapsed_seconds) => {
                let body = ElapsedRequest { elapsed_seconds };
                self.post(&path, &body).await
            }
            None => self.post_empty(&path).await,
        }
    }

    async fn resume_session(&self, session_id: SessionId) -> Result<Value, ApiError> {
        self.post_empty(&format!("/api/v1/sessions/{session_id}/resume"))
            .await
    }

    async fn update_session_time(
        &self,
        session_id: SessionId,
        elapsed_seconds: u64,
    ) -> Result<Value, ApiError> {
        let body = ElapsedRequest { elapsed_seconds };
        self.post(
            &format!("/api/v1/sessions/{session_id}/update-time"),
            &body,
        )
        .await
    }

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.post("/api/v1/answers/submit", submission).await
    }

    async fn user_answers(
        &self,
        user_id: &UserId,
        test_type: Option<TestType>,
    ) -> Result<Vec<AnswerRecord>, ApiError> {
        let path = match test_type {
            Some(test_type) => format!("/api/v1/answers/{user_id}/{}", test_type.slug()),
            None => format!("/api/v1/answers/{user_id}"),
        };
        let list: AnswerList = self.get(&path).await?;
        Ok(list.into_answers())
    }

    async fn comprehensive_report(
        &self,
        user_id: &UserId,
    ) -> Result<ComprehensiveReport, ApiError> {
        self.get(&format!("/api/v1/reports/{user_id}")).await
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get("/health").await
    }
}
