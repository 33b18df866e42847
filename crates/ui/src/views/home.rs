use dioxus::prelude::*;
use dioxus_router::use_navigator;

use persona_core::model::UserId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TestCardStatus, TestCardVm, map_test_cards};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<TestCardVm>,
    user_id: UserId,
    /// Owner of the stored progress; reports are looked up under this id.
    progress_user: UserId,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let identity = ctx.identity();
    let quiz_flow = ctx.quiz_flow();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let identity = identity.clone();
        async move {
            let state = progress.snapshot().await;
            let user_id = identity.user_id().await;
            Ok::<_, ViewError>(HomeData {
                cards: map_test_cards(&state),
                user_id,
                progress_user: state.user_id().clone(),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    let on_new_respondent = {
        let identity = ctx.identity();
        use_callback(move |()| {
            let identity = identity.clone();
            let quiz_flow = quiz_flow.clone();
            let mut resource = resource;
            spawn(async move {
                quiz_flow.abandon().await;
                identity.reset().await;
                resource.restart();
            });
        })
    };

    rsx! {
        div { class: "page home",
            h2 { "Personality Assessment" }
            p { class: "subtitle",
                "Pick a framework. Progress is saved as you go, so you can come back later."
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "test-grid",
                        for card in data.cards {
                            TestCard {
                                key: "{card.title}",
                                card: card.clone(),
                                on_open: {
                                    let progress_user = data.progress_user.clone();
                                    move |card: TestCardVm| {
                                        let target = match card.status {
                                            TestCardStatus::Completed => Route::Report {
                                                user_id: progress_user.clone(),
                                                test_type: card.test_type,
                                            },
                                            TestCardStatus::Available | TestCardStatus::Ongoing => {
                                                Route::Quiz { test_type: card.test_type }
                                            }
                                        };
                                        navigator.push(target);
                                    }
                                },
                            }
                        }
                    }
                    footer { class: "respondent",
                        span { "Respondent: {data.user_id}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_new_respondent.call(()),
                            "New respondent"
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn TestCard(card: TestCardVm, on_open: EventHandler<TestCardVm>) -> Element {
    let status_class = match card.status {
        TestCardStatus::Available => "available",
        TestCardStatus::Ongoing => "ongoing",
        TestCardStatus::Completed => "completed",
    };
    let action = card.status.action_label();

    rsx! {
        article { class: "test-card {card.theme_class} {status_class}",
            header {
                h3 { "{card.title}" }
                if let Some(badge) = card.status.badge() {
                    span { class: "badge", "{badge}" }
                }
            }
            p { class: "description", "{card.description}" }
            ul { class: "features",
                for feature in card.features.iter() {
                    li { "{feature}" }
                }
            }
            p { class: "estimate", "Estimated time: {card.estimated_time}" }
            if let Some(percent) = card.progress_percent {
                div { class: "progress",
                    div { class: "progress-bar", style: "width: {card.progress_bar_width}%" }
                }
                p { class: "progress-label", "{percent}% complete" }
            }
            if let Some(started) = card.started_at.as_deref() {
                p { class: "started", "Started {started}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: {
                    let card = card.clone();
                    move |_| on_open.call(card.clone())
                },
                "{action}"
            }
        }
    }
}
