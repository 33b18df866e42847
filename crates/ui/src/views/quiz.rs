use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use persona_core::model::{QuestionId, TestType};
use persona_core::progress::ProgressState;
use services::{ElapsedTimer, QuizSession, ViewScope};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizVm, format_elapsed, map_quiz};

/// Elapsed time is pushed to the server session at this cadence.
const ELAPSED_SYNC_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Prev,
    Next,
}

#[component]
pub fn QuizView(test_type: TestType) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let store = ctx.progress();
    let quiz_flow = ctx.quiz_flow();
    let denominator = ctx.quiz_denominator();

    let scope = use_hook(ViewScope::new);
    // Held for the lifetime of the view; dropping it cancels `scope`.
    use_hook(|| Rc::new(scope.guard()));
    let timer = use_hook(ElapsedTimer::new);

    let quiz = use_signal(|| None::<QuizSession>);
    let progress = use_signal(|| None::<ProgressState>);
    let elapsed = use_signal(|| 0_u64);
    let action_error = use_signal(|| None::<ViewError>);
    let submitting = use_signal(|| false);

    let resource = {
        let quiz_flow = quiz_flow.clone();
        let scope = scope.clone();
        let timer = timer.clone();
        use_resource(move || {
            let quiz_flow = quiz_flow.clone();
            let store = store.clone();
            let scope = scope.clone();
            let timer = timer.clone();
            let mut quiz = quiz;
            let mut progress = progress;
            let mut elapsed = elapsed;
            let mut action_error = action_error;

            async move {
                let started = scope
                    .finish(quiz_flow.begin(test_type, false))
                    .await
                    .ok_or(ViewError::Unknown)?
                    .map_err(|err| {
                        warn!(error = %err, test_type = test_type.slug(), "could not start quiz");
                        ViewError::from(&err)
                    })?;
                let snapshot = store.snapshot().await;
                elapsed.set(timer.resume_from(started.elapsed_seconds));
                quiz.set(Some(started));
                progress.set(Some(snapshot));
                action_error.set(None);
                Ok::<_, ViewError>(())
            }
        })
    };

    {
        let quiz_flow = quiz_flow.clone();
        let scope = scope.clone();
        let timer = timer.clone();
        use_future(move || {
            let quiz_flow = quiz_flow.clone();
            let scope = scope.clone();
            let timer = timer.clone();
            let mut elapsed = elapsed;

            async move {
                timer
                    .run(&scope, |seconds| {
                        elapsed.set(seconds);
                        if seconds % ELAPSED_SYNC_SECS != 0 {
                            return;
                        }
                        if let Some(current) = quiz.peek().clone() {
                            let quiz_flow = quiz_flow.clone();
                            spawn(async move {
                                quiz_flow.record_elapsed(&current, seconds).await;
                            });
                        }
                    })
                    .await;
            }
        });
    }

    let on_answer = {
        let quiz_flow = quiz_flow.clone();
        let scope = scope.clone();
        use_callback(move |(question_id, value): (QuestionId, String)| {
            let quiz_flow = quiz_flow.clone();
            let scope = scope.clone();
            let mut progress = progress;
            spawn(async move {
                if let Some(state) = scope.finish(quiz_flow.answer(question_id, value)).await {
                    progress.set(Some(state));
                }
            });
        })
    };

    let on_step = {
        let quiz_flow = quiz_flow.clone();
        let scope = scope.clone();
        use_callback(move |step: Step| {
            let Some(current) = quiz.peek().clone() else {
                return;
            };
            let quiz_flow = quiz_flow.clone();
            let scope = scope.clone();
            let mut progress = progress;
            spawn(async move {
                let moved = match step {
                    Step::Prev => scope.finish(quiz_flow.prev()).await,
                    Step::Next => scope.finish(quiz_flow.next(&current)).await,
                };
                if let Some(state) = moved {
                    progress.set(Some(state));
                }
            });
        })
    };

    let on_submit = {
        let quiz_flow = quiz_flow.clone();
        let scope = scope.clone();
        use_callback(move |()| {
            let Some(current) = quiz.peek().clone() else {
                return;
            };
            if *submitting.peek() {
                return;
            }
            let quiz_flow = quiz_flow.clone();
            let scope = scope.clone();
            let mut submitting = submitting;
            let mut action_error = action_error;
            submitting.set(true);
            action_error.set(None);

            spawn(async move {
                let Some(outcome) = scope.finish(quiz_flow.submit(&current)).await else {
                    return;
                };
                submitting.set(false);
                match outcome {
                    Ok(_) => {
                        navigator.push(Route::Report {
                            user_id: current.user_id.clone(),
                            test_type: current.test_type,
                        });
                    }
                    Err(err) => {
                        warn!(error = %err, test_type = current.test_type.slug(), "submit failed");
                        action_error.set(Some(ViewError::from(&err)));
                    }
                }
            });
        })
    };

    let on_save_exit = {
        let timer = timer.clone();
        use_callback(move |()| {
            let current = quiz.peek().clone();
            let seconds = timer.elapsed();
            let quiz_flow = quiz_flow.clone();
            spawn(async move {
                if let Some(current) = current {
                    if let Err(err) = quiz_flow.pause(&current, seconds).await {
                        warn!(error = %err, "could not pause session");
                    }
                }
                navigator.push(Route::Home {});
            });
        })
    };

    let state = view_state_from_resource(&resource);
    let vm = {
        let quiz = quiz.read();
        let progress = progress.read();
        match (quiz.as_ref(), progress.as_ref()) {
            (Some(quiz), Some(progress)) => map_quiz(quiz, progress, denominator),
            _ => None,
        }
    };
    let profile = test_type.profile();
    let theme_class = profile.theme.css_class();
    let elapsed_label = format_elapsed(elapsed());

    rsx! {
        div { class: "page quiz {theme_class}",
            header { class: "quiz-header",
                h2 { "{profile.title}" }
                span { class: "timer", "Time: {elapsed_label}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_save_exit.call(()),
                    "Save and exit"
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = vm {
                        QuestionPanel {
                            vm,
                            submitting: submitting(),
                            on_answer,
                            on_step,
                            on_submit,
                        }
                    } else {
                        p { "Loading questions..." }
                    }
                    if let Some(err) = action_error() {
                        div { class: "error",
                            p { "{err.message()}" }
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| on_submit.call(()),
                                "Retry"
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error",
                        p { "{err.message()}" }
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
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                navigator.push(Route::Home {});
                            },
                            "Back to tests"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuizVm,
    submitting: bool,
    on_answer: EventHandler<(QuestionId, String)>,
    on_step: EventHandler<Step>,
    on_submit: EventHandler<()>,
) -> Element {
    let question_id = vm.question_id;
    let submit_disabled = !vm.can_submit || submitting;
    let submit_label = if submitting { "Submitting..." } else { "Submit" };

    rsx! {
        section { class: "question-panel",
            div { class: "progress",
                div { class: "progress-bar", style: "width: {vm.progress_bar_width}%" }
            }
            p { class: "progress-label", "{vm.answered_label} ({vm.progress_percent}%)" }
            p { class: "position", "{vm.position_label}" }
            if !vm.category.is_empty() {
                span { class: "category", "{vm.category}" }
            }
            h3 { class: "question-text", "{vm.text}" }

            div { class: "choices",
                for choice in vm.choices.iter().cloned() {
                    button {
                        key: "{choice.value}",
                        class: if choice.selected { "choice selected" } else { "choice" },
                        r#type: "button",
                        onclick: {
                            let value = choice.value.clone();
                            move |_| on_answer.call((question_id, value.clone()))
                        },
                        "{choice.label}"
                    }
                }
            }

            nav { class: "quiz-nav",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: !vm.can_prev,
                    onclick: move |_| on_step.call(Step::Prev),
                    "Previous"
                }
                if vm.is_last {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submit_disabled,
                        onclick: move |_| on_submit.call(()),
                        "{submit_label}"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !vm.can_next,
                        onclick: move |_| on_step.call(Step::Next),
                        "Next"
                    }
                }
            }
            if vm.is_last {
                if let Some(hint) = vm.submit_hint.as_deref() {
                    p { class: "hint", "{hint}" }
                }
            }
        }
    }
}
