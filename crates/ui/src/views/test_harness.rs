use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use serde_json::{Value, json};

use persona_core::model::{
    AnswerRecord, ComprehensiveReport, LatestSession, Question, QuestionId, QuestionOptions,
    SessionId, SessionInfo, SessionStatus, SubmissionReceipt, TestType, UserId,
};
use persona_core::progress::ProgressDenominator;
use persona_core::time::fixed_clock;
use services::api::{AnswerSubmission, StatusCode, TestTypeCatalog};
use services::error::ApiError;
use services::{
    AppServices, AssessmentApi, IdentityService, ProgressStore, QuizFlowService, ReportService,
};
use storage::repository::InMemoryKeyValueStore;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, QuizView, ReportView};

/// Canned question service for view tests.
#[derive(Default)]
pub struct StubApi {
    pub questions: Mutex<Vec<Question>>,
    pub fail_questions: Mutex<bool>,
    /// `None` answers 404.
    pub report: Mutex<Option<ComprehensiveReport>>,
}

impl StubApi {
    pub fn with_questions(count: u32) -> Self {
        let api = Self::default();
        *api.questions.lock().unwrap() = (1..=count)
            .map(|id| Question {
                id: QuestionId::new(id),
                text: format!("Statement number {id}"),
                category: "E-I".into(),
                test_type: "MBTI".into(),
                options: QuestionOptions::List(vec!["Agree".into(), "Disagree".into()]),
                weight: Value::Null,
            })
            .collect();
        api
    }

    pub fn set_report(&self, detailed_analysis: Value) {
        let report = serde_json::from_value(json!({
            "user_id": "user_view",
            "report_generated_at": "2024-05-01T10:00:00",
            "detailed_analysis": detailed_analysis,
        }))
        .unwrap();
        *self.report.lock().unwrap() = Some(report);
    }
}

#[async_trait]
impl AssessmentApi for StubApi {
    async fn questions(
        &self,
        _test_type: TestType,
        _random: bool,
    ) -> Result<Vec<Question>, ApiError> {
        if *self.fail_questions.lock().unwrap() {
            return Err(ApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn questions_batch(&self, _ids: &[QuestionId]) -> Result<Vec<Question>, ApiError> {
        Ok(Vec::new())
    }

    async fn test_types(&self) -> Result<TestTypeCatalog, ApiError> {
        Ok(TestTypeCatalog::default())
    }

    async fn create_session(
        &self,
        _user_id: &UserId,
        _test_type: TestType,
        question_ids: Option<&[QuestionId]>,
    ) -> Result<SessionInfo, ApiError> {
        let ids = question_ids.map(<[QuestionId]>::to_vec).unwrap_or_default();
        Ok(SessionInfo {
            session_id: SessionId::new(9),
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
        Ok(LatestSession::default())
    }

    async fn pause_session(
        &self,
        _session_id: SessionId,
        _elapsed_seconds: Option<u64>,
    ) -> Result<Value, ApiError> {
        Ok(json!({}))
    }

    async fn resume_session(&self, _session_id: SessionId) -> Result<Value, ApiError> {
        Ok(json!({}))
    }

    async fn update_session_time(
        &self,
        _session_id: SessionId,
        _elapsed_seconds: u64,
    ) -> Result<Value, ApiError> {
        Ok(json!({}))
    }

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<SubmissionReceipt, ApiError> {
        let answered = u32::try_from(submission.answers.len()).unwrap();
        Ok(SubmissionReceipt {
            total_questions: answered,
            answered_questions: answered,
            completion_rate: 100.0,
            message: None,
        })
    }

    async fn user_answers(
        &self,
        _user_id: &UserId,
        _test_type: Option<TestType>,
    ) -> Result<Vec<AnswerRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn comprehensive_report(
        &self,
        user_id: &UserId,
    ) -> Result<ComprehensiveReport, ApiError> {
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("/api/v1/reports/{user_id}")))
    }

    async fn health(&self) -> Result<Value, ApiError> {
        Ok(json!({"status": "healthy"}))
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressStore> {
        self.services.progress()
    }

    fn identity(&self) -> Arc<IdentityService> {
        self.services.identity()
    }

    fn quiz_flow(&self) -> Arc<QuizFlowService> {
        self.services.quiz_flow()
    }

    fn reports(&self) -> Arc<ReportService> {
        self.services.reports()
    }

    fn quiz_denominator(&self) -> ProgressDenominator {
        self.services.denominator()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(TestType),
    Report(UserId, TestType),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(test_type) => rsx! { QuizView { test_type } },
        ViewKind::Report(user_id, test_type) => rsx! { ReportView { user_id, test_type } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub kv: InMemoryKeyValueStore,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until pending resources have settled.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, api: StubApi) -> ViewHarness {
    setup_view_harness_with_store(view, api, InMemoryKeyValueStore::new()).await
}

pub async fn setup_view_harness_with_store(
    view: ViewKind,
    api: StubApi,
    kv: InMemoryKeyValueStore,
) -> ViewHarness {
    let services = AppServices::assemble(
        Arc::new(kv.clone()),
        Arc::new(api) as Arc<dyn AssessmentApi>,
        fixed_clock(),
        ProgressDenominator::default(),
    )
    .await;

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, kv, services }
}
