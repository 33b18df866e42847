use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use persona_core::model::{
    AnswerRecord, Question, QuestionId, SessionId, SubmittedAnswer, TestType, UserId,
};

/// Body of `POST /api/v1/answers/submit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    pub user_id: UserId,
    pub test_type: TestType,
    pub answers: Vec<SubmittedAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

/// Frameworks the service has questions for, with their bank sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TestTypeCatalog {
    #[serde(default)]
    pub test_types: Vec<String>,
    #[serde(default)]
    pub total_questions: BTreeMap<String, u32>,
}

impl TestTypeCatalog {
    /// Frameworks this client knows how to present.
    #[must_use]
    pub fn supported(&self) -> Vec<TestType> {
        self.test_types
            .iter()
            .filter_map(|raw| raw.parse().ok())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchRequest<'a> {
    pub ids: &'a [QuestionId],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub user_id: &'a UserId,
    pub test_type: TestType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_ids: Option<&'a [QuestionId]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ElapsedRequest {
    pub elapsed_seconds: u64,
}

/// The service wraps question lists in an envelope; older builds do not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuestionList {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

impl QuestionList {
    pub fn into_questions(self) -> Vec<Question> {
        match self {
            QuestionList::Wrapped { questions } | QuestionList::Bare(questions) => questions,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AnswerList {
    Wrapped { answers: Vec<AnswerRecord> },
    Bare(Vec<AnswerRecord>),
}

impl AnswerList {
    pub fn into_answers(self) -> Vec<AnswerRecord> {
        match self {
            AnswerList::Wrapped { answers } | AnswerList::Bare(answers) => answers,
        }
    }
}
