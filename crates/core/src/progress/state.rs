use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{QuestionId, TestType, UserId};

/// Question count assumed by the home screen when it shows quiz progress.
pub const FIXED_TOTAL_QUESTIONS: u32 = 30;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("malformed progress snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Progress of the quiz currently being taken.
///
/// The serialized form is the durable snapshot, so field names stay in the
/// camelCase layout older snapshots were written with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(default)]
    pub(crate) current_test: Option<TestType>,
    #[serde(default, rename = "currentQuestion")]
    pub(crate) current_question_index: usize,
    #[serde(default)]
    pub(crate) answers: BTreeMap<QuestionId, String>,
    #[serde(default)]
    pub(crate) is_completed: bool,
    #[serde(default)]
    pub(crate) user_id: UserId,
    #[serde(default)]
    pub(crate) total_questions: u32,
    #[serde(default)]
    pub(crate) start_time: Option<i64>,
}

impl ProgressState {
    #[must_use]
    pub fn current_test(&self) -> Option<TestType> {
        self.current_test
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, String> {
        &self.answers
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Quiz start as epoch milliseconds.
    #[must_use]
    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    /// A quiz is selected and not yet finalized.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_test.is_some() && !self.is_completed
    }

    /// Active quiz with at least one recorded answer.
    #[must_use]
    pub fn has_unfinished_test(&self) -> bool {
        self.is_active() && !self.answers.is_empty()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_question_answered(&self, question_id: QuestionId) -> bool {
        self.answers.contains_key(&question_id)
    }

    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    /// `round(100 * answered / total)`, or 0 when the denominator is 0.
    ///
    /// Not clamped: answering more questions than the denominator reports
    /// more than 100.
    #[must_use]
    pub fn progress_percentage(&self, denominator: ProgressDenominator) -> u32 {
        let total = u64::from(denominator.resolve(self));
        if total == 0 {
            return 0;
        }
        let answered = self.answers.len() as u64;
        let rounded = (answered * 200 + total) / (total * 2);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// Encodes the state as a durable snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Malformed` if serialization fails.
    pub fn to_snapshot_json(&self) -> Result<String, ProgressError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a durable snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Malformed` for invalid JSON, unsupported test
    /// types or non-numeric answer keys.
    pub fn from_snapshot_json(raw: &str) -> Result<Self, ProgressError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Which total the progress percentage is computed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressDenominator {
    /// The question count captured when the quiz started.
    #[default]
    Dynamic,
    Fixed(u32),
}

impl ProgressDenominator {
    #[must_use]
    pub fn home_screen() -> Self {
        Self::Fixed(FIXED_TOTAL_QUESTIONS)
    }

    #[must_use]
    pub fn resolve(self, state: &ProgressState) -> u32 {
        match self {
            ProgressDenominator::Dynamic => state.total_questions,
            ProgressDenominator::Fixed(total) => total,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected `dynamic` or a positive question count, got {raw:?}")]
pub struct ParseDenominatorError {
    pub raw: String,
}

impl FromStr for ProgressDenominator {
    type Err = ParseDenominatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("dynamic") {
            return Ok(Self::Dynamic);
        }
        match trimmed.parse::<u32>() {
            Ok(total) if total > 0 => Ok(Self::Fixed(total)),
            _ => Err(ParseDenominatorError { raw: s.to_string() }),
        }
    }
}

impl fmt::Display for ProgressDenominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressDenominator::Dynamic => f.write_str("dynamic"),
            ProgressDenominator::Fixed(total) => write!(f, "{total}"),
        }
    }
}
