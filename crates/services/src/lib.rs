#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod config;
pub mod error;
pub mod identity;
pub mod progress_store;
pub mod quiz_flow;
pub mod report_service;
pub mod scope;

pub use persona_core::Clock;

pub use api::{AssessmentApi, HttpAssessmentApi};
pub use app_services::AppServices;
pub use config::ClientConfig;
pub use error::{ApiError, AppServicesError, ConfigError, QuizFlowError, ReportError};
pub use identity::{IdentityService, USER_ID_KEY};
pub use progress_store::{PROGRESS_KEY, ProgressStore};
pub use quiz_flow::{
    QuizFlowService, QuizSession, SUBMIT_THRESHOLD_PERCENT, can_submit, required_answers,
};
pub use report_service::ReportService;
pub use scope::{ElapsedTimer, ScopeGuard, ViewScope};
