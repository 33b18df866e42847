use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, SessionId};

/// Server-side state of a quiz attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Paused,
    Completed,
    #[serde(other)]
    Other,
}

impl SessionStatus {
    #[must_use]
    pub fn is_resumable(self) -> bool {
        matches!(self, SessionStatus::InProgress | SessionStatus::Paused)
    }
}

/// Acknowledgement returned when a session is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default, deserialize_with = "lenient_question_ids")]
    pub question_ids: Vec<QuestionId>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredEntry {
    pub answer: String,
    #[serde(default)]
    pub answered_at: Option<String>,
}

/// Latest session for a user and test type, used to resume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSession {
    pub has_session: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub answered_count: Option<u32>,
    #[serde(default)]
    pub next_question_index: Option<u32>,
    #[serde(default)]
    pub elapsed_seconds: Option<u64>,
    #[serde(default, deserialize_with = "lenient_question_ids")]
    pub question_ids: Vec<QuestionId>,
    #[serde(default)]
    pub answered_questions: BTreeMap<String, AnsweredEntry>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LatestSession {
    /// The session id, if the session can still be continued.
    #[must_use]
    pub fn resumable_id(&self) -> Option<SessionId> {
        if !self.has_session {
            return None;
        }
        match self.status {
            Some(status) if !status.is_resumable() => None,
            _ => self.session_id,
        }
    }
}

/// The service sends question ids either as numbers or as numeric strings.
fn lenient_question_ids<'de, D>(deserializer: D) -> Result<Vec<QuestionId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(u32),
        Text(String),
    }

    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|item| match item {
            RawId::Num(value) => Ok(QuestionId::new(value)),
            RawId::Text(text) => text.parse().map_err(serde::de::Error::custom),
        })
        .collect()
}
