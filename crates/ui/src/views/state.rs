use dioxus::prelude::*;

use services::error::{QuizFlowError, ReportError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The question service could not be reached or rejected the request.
    Network,
    NoQuestions,
    NotCompleted,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Network => "Could not reach the assessment service. Please try again.",
            ViewError::NoQuestions => "This test has no questions yet.",
            ViewError::NotCompleted => "This test has not been completed yet.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Whether retrying the same request can help.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, ViewError::Network | ViewError::Unknown)
    }
}

impl From<&QuizFlowError> for ViewError {
    fn from(err: &QuizFlowError) -> Self {
        match err {
            QuizFlowError::Api(_) => ViewError::Network,
            QuizFlowError::NoQuestions(_) => ViewError::NoQuestions,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&ReportError> for ViewError {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::NotCompleted { .. } => ViewError::NotCompleted,
            ReportError::Api(_) => ViewError::Network,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
