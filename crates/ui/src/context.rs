use std::sync::Arc;

use persona_core::progress::ProgressDenominator;
use services::{IdentityService, ProgressStore, QuizFlowService, ReportService};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressStore>;
    fn identity(&self) -> Arc<IdentityService>;
    fn quiz_flow(&self) -> Arc<QuizFlowService>;
    fn reports(&self) -> Arc<ReportService>;

    /// Denominator for the quiz screen's progress bar.
    fn quiz_denominator(&self) -> ProgressDenominator;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_denominator: ProgressDenominator,
    progress: Arc<ProgressStore>,
    identity: Arc<IdentityService>,
    quiz_flow: Arc<QuizFlowService>,
    reports: Arc<ReportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_denominator: app.quiz_denominator(),
            progress: app.progress(),
            identity: app.identity(),
            quiz_flow: app.quiz_flow(),
            reports: app.reports(),
        }
    }

    #[must_use]
    pub fn quiz_denominator(&self) -> ProgressDenominator {
        self.quiz_denominator
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn identity(&self) -> Arc<IdentityService> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn quiz_flow(&self) -> Arc<QuizFlowService> {
        Arc::clone(&self.quiz_flow)
    }

    #[must_use]
    pub fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }
}

// Provided once by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
