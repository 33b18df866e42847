use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::TestType;

/// Qualitative band for a 0-10 trait score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ScoreLevel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreLevel::VeryHigh
        } else if score >= 6.0 {
            ScoreLevel::High
        } else if score >= 4.0 {
            ScoreLevel::Medium
        } else if score >= 2.0 {
            ScoreLevel::Low
        } else {
            ScoreLevel::VeryLow
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreLevel::VeryHigh => "Very high",
            ScoreLevel::High => "High",
            ScoreLevel::Medium => "Medium",
            ScoreLevel::Low => "Low",
            ScoreLevel::VeryLow => "Very low",
        }
    }
}

/// Per-framework result extracted from the comprehensive report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitReport {
    pub scores: BTreeMap<String, f64>,
    pub personality_type: Option<String>,
    pub description: Option<String>,
    pub preference_strengths: BTreeMap<String, f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub career_suggestions: Vec<String>,
    pub communication_style: Option<String>,
    pub work_style: Option<String>,
    pub development_suggestions: Vec<String>,
}

impl TraitReport {
    /// Builds a report from one `detailed_analysis` section.
    ///
    /// Returns `None` when the section carries no scores, which means the
    /// respondent has not finished that framework yet.
    #[must_use]
    pub fn from_analysis_section(section: &Value) -> Option<Self> {
        let scores = number_map(section.get("scores")?);
        if scores.is_empty() {
            return None;
        }

        Some(Self {
            scores,
            personality_type: first_text(
                section,
                &["personality_type", "primary_style", "primary_type"],
            ),
            description: first_text(section, &["description"]),
            preference_strengths: section
                .get("preference_strengths")
                .map(number_map)
                .unwrap_or_default(),
            strengths: first_list(section, &["strengths"]),
            weaknesses: first_list(section, &["weaknesses"]),
            career_suggestions: first_list(section, &["career_suggestions", "career_matches"]),
            communication_style: first_text(
                section,
                &["communication_style", "interpersonal_style"],
            ),
            work_style: first_text(section, &["work_style"]),
            development_suggestions: first_list(section, &["development_suggestions"]),
        })
    }

    /// Scores in the framework's chart order; missing traits score zero.
    #[must_use]
    pub fn ordered_scores(&self, test_type: TestType) -> Vec<(&'static str, f64)> {
        test_type
            .profile()
            .chart_order
            .iter()
            .map(|code| (*code, self.score_for(code).unwrap_or(0.0)))
            .collect()
    }

    #[must_use]
    pub fn score_for(&self, code: &str) -> Option<f64> {
        self.scores.get(code).copied().or_else(|| {
            self.scores
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(code))
                .map(|(_, value)| *value)
        })
    }
}

/// Raw comprehensive report covering every framework the user completed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub report_generated_at: Option<String>,
    #[serde(default)]
    pub detailed_analysis: BTreeMap<String, Value>,
}

impl ComprehensiveReport {
    #[must_use]
    pub fn section(&self, test_type: TestType) -> Option<&Value> {
        self.detailed_analysis
            .get(test_type.slug())
            .filter(|value| !value.is_null())
    }
}

fn number_map(value: &Value) -> BTreeMap<String, f64> {
    value
        .as_object()
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, value)| value.as_f64().map(|num| (key.clone(), num)))
                .collect()
        })
        .unwrap_or_default()
}

fn first_text(section: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match section.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    })
}

fn first_list(section: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| {
            let items = section.get(*key)?.as_array()?;
            Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect::<Vec<_>>(),
            )
        })
        .unwrap_or_default()
}
