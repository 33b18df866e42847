use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Answer choices as delivered by the question service.
///
/// Older question sets ship a plain list of labels; newer ones a keyed map
/// (`{"A": "...", "B": "..."}`) where the key is the recorded answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionOptions {
    List(Vec<String>),
    Keyed(BTreeMap<String, serde_json::Value>),
}

impl Default for QuestionOptions {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// A selectable option: `value` is what gets recorded, `label` what is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionChoice {
    pub value: String,
    pub label: String,
}

impl QuestionOptions {
    #[must_use]
    pub fn choices(&self) -> Vec<QuestionChoice> {
        match self {
            QuestionOptions::List(labels) => labels
                .iter()
                .map(|label| QuestionChoice {
                    value: label.clone(),
                    label: label.clone(),
                })
                .collect(),
            QuestionOptions::Keyed(map) => map
                .iter()
                .map(|(key, value)| QuestionChoice {
                    value: key.clone(),
                    label: match value {
                        serde_json::Value::String(text) => text.clone(),
                        other => other.to_string(),
                    },
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            QuestionOptions::List(labels) => labels.len(),
            QuestionOptions::Keyed(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub category: String,
    /// Framework as spelled by the service (`"MBTI"`, `"mbti"`, ...).
    #[serde(default)]
    pub test_type: String,
    #[serde(default)]
    pub options: QuestionOptions,
    #[serde(default)]
    pub weight: serde_json::Value,
}
