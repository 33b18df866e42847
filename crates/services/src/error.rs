//! Shared error types for the services crate.

use thiserror::Error;

use persona_core::model::{ApiSettingsError, TestType};
use persona_core::progress::ParseDenominatorError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AssessmentApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request to {0} was not found")]
    NotFound(String),
    #[error("assessment service returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Errors emitted by `ReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("{user_id} has not completed the {test_type} assessment yet")]
    NotCompleted { user_id: String, test_type: TestType },
    #[error(transparent)]
    Api(ApiError),
}

/// Errors emitted by `QuizFlowService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("no questions available for {0}")]
    NoQuestions(TestType),
    #[error("no assessment in progress")]
    NoActiveTest,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Api(#[from] ApiSettingsError),
    #[error("invalid timeout {0:?}")]
    Timeout(String),
    #[error(transparent)]
    Denominator(#[from] ParseDenominatorError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
