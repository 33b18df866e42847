use persona_core::model::{ScoreLevel, TRAIT_PALETTE, TestType, TraitReport};

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreCardVm {
    pub code: &'static str,
    pub label: String,
    pub description: &'static str,
    pub score: f64,
    pub score_label: String,
    pub level_label: &'static str,
    /// Bar width in percent of the 0-10 scale.
    pub bar_width: u32,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportVm {
    pub title: &'static str,
    pub theme_class: &'static str,
    pub personality_type: Option<String>,
    pub description: Option<String>,
    pub score_cards: Vec<ScoreCardVm>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub career_suggestions: Vec<String>,
    pub communication_style: Option<String>,
    pub work_style: Option<String>,
    pub development_suggestions: Vec<String>,
}

#[must_use]
pub fn map_report(test_type: TestType, report: &TraitReport) -> ReportVm {
    let profile = test_type.profile();
    let score_cards = report
        .ordered_scores(test_type)
        .into_iter()
        .enumerate()
        .map(|(idx, (code, score))| {
            let description = test_type
                .trait_info(code)
                .map_or("", |info| info.description);
            ScoreCardVm {
                code,
                label: test_type.chart_label(code),
                description,
                score,
                score_label: format!("{score:.1}"),
                level_label: ScoreLevel::from_score(score).label(),
                bar_width: bar_width(score),
                color: TRAIT_PALETTE[idx % TRAIT_PALETTE.len()],
            }
        })
        .collect();

    ReportVm {
        title: profile.title,
        theme_class: profile.theme.css_class(),
        personality_type: report.personality_type.clone(),
        description: report.description.clone(),
        score_cards,
        strengths: report.strengths.clone(),
        weaknesses: report.weaknesses.clone(),
        career_suggestions: report.career_suggestions.clone(),
        communication_style: report.communication_style.clone(),
        work_style: report.work_style.clone(),
        development_suggestions: report.development_suggestions.clone(),
    }
}

fn bar_width(score: f64) -> u32 {
    let width = (score * 10.0).round().clamp(0.0, 100.0);
    // Clamped to 0..=100 above, so the cast cannot truncate.
    width as u32
}
