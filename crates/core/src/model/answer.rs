use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, UserId};

/// One answer as posted to the submission endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub answer: String,
}

/// A previously stored answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Acknowledgement of a submission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub answered_questions: u32,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub message: Option<String>,
}
