use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::debug;

use persona_core::model::{TestType, UserId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReportVm, ScoreCardVm, map_report};

#[component]
pub fn ReportView(user_id: UserId, test_type: TestType) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let reports = ctx.reports();

    let resource = use_resource(move || {
        let reports = reports.clone();
        let user_id = user_id.clone();
        async move {
            let report = reports
                .report_for(&user_id, test_type)
                .await
                .map_err(|err| {
                    debug!(error = %err, test_type = test_type.slug(), "report unavailable");
                    ViewError::from(&err)
                })?;
            Ok::<_, ViewError>(map_report(test_type, &report))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page report",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading report..." }
                },
                ViewState::Ready(report) => rsx! {
                    ReportDetails { report }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error",
                        p { "{err.message()}" }
                        if err == ViewError::NotCompleted {
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    navigator.push(Route::Quiz { test_type });
                                },
                                "Take the test"
                            }
                        }
                        if err.is_retryable() {
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut resource = resource;
                                    resource.restart();
                                },
                                "Retry"
                            }
                        }
                    }
                },
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    navigator.push(Route::Home {});
                },
                "Back to tests"
            }
        }
    }
}

#[component]
fn ReportDetails(report: ReportVm) -> Element {
    rsx! {
        header { class: "report-header {report.theme_class}",
            h2 { "{report.title} report" }
            if let Some(kind) = report.personality_type.as_deref() {
                p { class: "personality-type", "Your type: {kind}" }
            }
            if let Some(description) = report.description.as_deref() {
                p { class: "description", "{description}" }
            }
        }

        section { class: "score-cards",
            h3 { "Scores" }
            for card in report.score_cards.iter().cloned() {
                ScoreCard { key: "{card.code}", card }
            }
        }

        TextList { title: "Strengths", items: report.strengths.clone() }
        TextList { title: "Areas to watch", items: report.weaknesses.clone() }
        if let Some(style) = report.communication_style.as_deref() {
            section { class: "report-text",
                h3 { "Communication style" }
                p { "{style}" }
            }
        }
        if let Some(style) = report.work_style.as_deref() {
            section { class: "report-text",
                h3 { "Work style" }
                p { "{style}" }
            }
        }
        TextList { title: "Career suggestions", items: report.career_suggestions.clone() }
        TextList { title: "Development suggestions", items: report.development_suggestions.clone() }
    }
}

#[component]
fn ScoreCard(card: ScoreCardVm) -> Element {
    rsx! {
        div { class: "score-card",
            div { class: "score-head",
                span { class: "score-label", "{card.label}" }
                span { class: "score-value", "{card.score_label}" }
                span { class: "score-level", "{card.level_label}" }
            }
            div { class: "score-track",
                div {
                    class: "score-bar",
                    style: "width: {card.bar_width}%; background: {card.color}",
                }
            }
            if !card.description.is_empty() {
                p { class: "score-description", "{card.description}" }
            }
        }
    }
}

/// Renders nothing for an empty list.
#[component]
fn TextList(title: &'static str, items: Vec<String>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "report-list",
            h3 { "{title}" }
            ul {
                for item in items {
                    li { "{item}" }
                }
            }
        }
    }
}
