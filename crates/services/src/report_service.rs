use std::sync::Arc;

use tracing::debug;

use persona_core::model::{TestType, TraitReport, UserId};

use crate::api::AssessmentApi;
use crate::error::{ApiError, ReportError};

/// Extracts per-framework results from the comprehensive report.
#[derive(Clone)]
pub struct ReportService {
    api: Arc<dyn AssessmentApi>,
}

impl ReportService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// Result for one framework.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NotCompleted` when the user has no scored result
    /// for `test_type` (including a 404 for the whole report), and
    /// `ReportError::Api` for any other service failure.
    pub async fn report_for(
        &self,
        user_id: &UserId,
        test_type: TestType,
    ) -> Result<TraitReport, ReportError> {
        let not_completed = || ReportError::NotCompleted {
            user_id: user_id.to_string(),
            test_type,
        };

        let report = match self.api.comprehensive_report(user_id).await {
            Ok(report) => report,
            Err(ApiError::NotFound(_)) => return Err(not_completed()),
            Err(err) => return Err(ReportError::Api(err)),
        };

        let section = report.section(test_type).ok_or_else(not_completed)?;
        let result = TraitReport::from_analysis_section(section).ok_or_else(not_completed)?;
        debug!(
            user_id = %user_id,
            test_type = test_type.slug(),
            scores = result.scores.len(),
            "extracted report section"
        );
        Ok(result)
    }
}
