use std::sync::Arc;

use persona_core::progress::ProgressDenominator;
use storage::repository::{KeyValueStore, Storage};

use crate::Clock;
use crate::api::{AssessmentApi, HttpAssessmentApi};
use crate::config::ClientConfig;
use crate::error::AppServicesError;
use crate::identity::IdentityService;
use crate::progress_store::ProgressStore;
use crate::quiz_flow::QuizFlowService;
use crate::report_service::ReportService;

/// Assembles app-facing services around one store and one API client.
#[derive(Clone)]
pub struct AppServices {
    denominator: ProgressDenominator,
    progress: Arc<ProgressStore>,
    identity: Arc<IdentityService>,
    api: Arc<dyn AssessmentApi>,
    quiz_flow: Arc<QuizFlowService>,
    reports: Arc<ReportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage cannot be opened or the HTTP
    /// client cannot be built.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ClientConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api = HttpAssessmentApi::new(config.api.clone())?;
        Ok(Self::assemble(storage.kv, Arc::new(api), clock, config.denominator).await)
    }

    /// Build services over an arbitrary store and API, restoring saved progress.
    pub async fn assemble(
        kv: Arc<dyn KeyValueStore>,
        api: Arc<dyn AssessmentApi>,
        clock: Clock,
        denominator: ProgressDenominator,
    ) -> Self {
        let progress = Arc::new(ProgressStore::initialize(clock, Arc::clone(&kv)).await);
        let identity = Arc::new(IdentityService::new(kv));
        let quiz_flow = Arc::new(QuizFlowService::new(
            Arc::clone(&progress),
            Arc::clone(&identity),
            Arc::clone(&api),
        ));
        let reports = Arc::new(ReportService::new(Arc::clone(&api)));

        Self {
            denominator,
            progress,
            identity,
            api,
            quiz_flow,
            reports,
        }
    }

    /// Denominator the quiz screen uses for its progress bar.
    #[must_use]
    pub fn denominator(&self) -> ProgressDenominator {
        self.denominator
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
    pub fn api(&self) -> Arc<dyn AssessmentApi> {
        Arc::clone(&self.api)
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
