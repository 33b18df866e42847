use std::sync::Arc;

use tracing::{debug, info, warn};

use persona_core::model::{
    Question, QuestionId, SessionId, SubmissionReceipt, SubmittedAnswer, TestType, UserId,
};
use persona_core::progress::{ProgressAction, ProgressState};

use crate::api::{AnswerSubmission, AssessmentApi};
use crate::error::QuizFlowError;
use crate::identity::IdentityService;
use crate::progress_store::ProgressStore;

/// Share of questions that must be answered before submitting.
pub const SUBMIT_THRESHOLD_PERCENT: u32 = 80;

/// Answers needed before `total` questions can be submitted.
#[must_use]
pub fn required_answers(total: u32) -> u32 {
    let needed = (u64::from(total) * u64::from(SUBMIT_THRESHOLD_PERCENT)).div_ceil(100);
    u32::try_from(needed).unwrap_or(u32::MAX)
}

/// Whether `state` has enough answers to submit.
#[must_use]
pub fn can_submit(state: &ProgressState) -> bool {
    let total = state.total_questions();
    total > 0 && state.answered_count() as u64 >= u64::from(required_answers(total))
}

/// A quiz the respondent is currently taking.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizSession {
    pub test_type: TestType,
    pub user_id: UserId,
    pub questions: Vec<Question>,
    /// Server-side session, when one could be opened.
    pub session_id: Option<SessionId>,
    /// True when local progress from an earlier run was picked up.
    pub resumed: bool,
    /// Time the server session had already recorded when the quiz began.
    pub elapsed_seconds: u64,
}

impl QuizSession {
    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

/// Drives a quiz from question fetch to submission.
pub struct QuizFlowService {
    store: Arc<ProgressStore>,
    identity: Arc<IdentityService>,
    api: Arc<dyn AssessmentApi>,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(
        store: Arc<ProgressStore>,
        identity: Arc<IdentityService>,
        api: Arc<dyn AssessmentApi>,
    ) -> Self {
        Self {
            store,
            identity,
            api,
        }
    }

    /// Fetch questions and start, or resume, a quiz of `test_type`.
    ///
    /// Unfinished local progress for the same framework and question count is
    /// kept. Opening a server session is best effort.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Api` if the questions cannot be fetched and
    /// `QuizFlowError::NoQuestions` if the service has none.
    pub async fn begin(
        &self,
        test_type: TestType,
        random: bool,
    ) -> Result<QuizSession, QuizFlowError> {
        let questions = self.api.questions(test_type, random).await?;
        if questions.is_empty() {
            return Err(QuizFlowError::NoQuestions(test_type));
        }
        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);

        let current = self.store.snapshot().await;
        let resumed = current.has_unfinished_test()
            && current.current_test() == Some(test_type)
            && current.total_questions() == total;

        let user_id = if resumed {
            current.user_id().clone()
        } else {
            let user_id = self.identity.user_id().await;
            self.store
                .dispatch(ProgressAction::StartTest {
                    test_type,
                    user_id: user_id.clone(),
                    total_questions: total,
                })
                .await;
            user_id
        };

        let question_ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();
        let (session_id, elapsed_seconds) = self
            .open_session(&user_id, test_type, &question_ids, resumed)
            .await;

        info!(
            test_type = test_type.slug(),
            total,
            resumed,
            has_session = session_id.is_some(),
            elapsed_seconds,
            "quiz started"
        );

        Ok(QuizSession {
            test_type,
            user_id,
            questions,
            session_id,
            resumed,
            elapsed_seconds,
        })
    }

    async fn open_session(
        &self,
        user_id: &UserId,
        test_type: TestType,
        question_ids: &[QuestionId],
        resumed: bool,
    ) -> (Option<SessionId>, u64) {
        if resumed {
            match self.api.latest_session(user_id, test_type).await {
                Ok(latest) => {
                    if let Some(id) = latest.resumable_id() {
                        if let Err(err) = self.api.resume_session(id).await {
                            warn!(error = %err, session_id = %id, "could not resume session");
                        }
                        return (Some(id), latest.elapsed_seconds.unwrap_or(0));
                    }
                }
                Err(err) => debug!(error = %err, "no previous session to resume"),
            }
        }

        match self
            .api
            .create_session(user_id, test_type, Some(question_ids))
            .await
        {
            Ok(info) => (Some(info.session_id), 0),
            Err(err) => {
                warn!(error = %err, "could not open a session; continuing without one");
                (None, 0)
            }
        }
    }

    pub async fn answer(
        &self,
        question_id: QuestionId,
        answer: impl Into<String>,
    ) -> ProgressState {
        self.store
            .dispatch(ProgressAction::AnswerQuestion {
                question_id,
                answer: answer.into(),
            })
            .await
    }

    /// Move forward unless already on the last question.
    pub async fn next(&self, quiz: &QuizSession) -> ProgressState {
        let last = quiz.last_index();
        self.store
            .dispatch_if(ProgressAction::NextQuestion, |state| {
                state.current_question_index() < last
            })
            .await
    }

    /// Move back unless already on the first question.
    pub async fn prev(&self) -> ProgressState {
        self.store
            .dispatch_if(ProgressAction::PrevQuestion, |state| {
                state.current_question_index() > 0
            })
            .await
    }

    pub async fn can_submit(&self) -> bool {
        can_submit(&self.store.snapshot().await)
    }

    /// Post every recorded answer and mark the quiz complete.
    ///
    /// Progress is only completed after the service accepts the answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoActiveTest` if `quiz` is not the quiz in
    /// progress, or `QuizFlowError::Api` if the submission fails.
    pub async fn submit(&self, quiz: &QuizSession) -> Result<SubmissionReceipt, QuizFlowError> {
        let state = self.store.snapshot().await;
        if state.is_completed() || state.current_test() != Some(quiz.test_type) {
            return Err(QuizFlowError::NoActiveTest);
        }

        let answers = state
            .answers()
            .iter()
            .map(|(question_id, answer)| SubmittedAnswer {
                question_id: *question_id,
                answer: answer.clone(),
            })
            .collect();
        let submission = AnswerSubmission {
            user_id: state.user_id().clone(),
            test_type: quiz.test_type,
            answers,
            session_id: quiz.session_id,
        };

        let receipt = self.api.submit_answers(&submission).await?;
        self.store.dispatch(ProgressAction::CompleteTest).await;
        info!(
            test_type = quiz.test_type.slug(),
            answered = submission.answers.len(),
            "answers submitted"
        );
        Ok(receipt)
    }

    /// # Errors
    ///
    /// Returns `QuizFlowError::Api` if the service rejects the pause.
    pub async fn pause(
        &self,
        quiz: &QuizSession,
        elapsed_seconds: u64,
    ) -> Result<(), QuizFlowError> {
        if let Some(id) = quiz.session_id {
            self.api.pause_session(id, Some(elapsed_seconds)).await?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizFlowError::Api` if the service rejects the resume.
    pub async fn resume(&self, quiz: &QuizSession) -> Result<(), QuizFlowError> {
        if let Some(id) = quiz.session_id {
            self.api.resume_session(id).await?;
        }
        Ok(())
    }

    /// Report time spent so far. Failures are logged only.
    pub async fn record_elapsed(&self, quiz: &QuizSession, elapsed_seconds: u64) {
        if let Some(id) = quiz.session_id {
            if let Err(err) = self.api.update_session_time(id, elapsed_seconds).await {
                debug!(error = %err, session_id = %id, "could not record elapsed time");
            }
        }
    }

    /// Drop local progress for the current quiz.
    pub async fn abandon(&self) {
        self.store.dispatch(ProgressAction::ResetTest).await;
    }
}
