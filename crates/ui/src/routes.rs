use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use persona_core::model::{TestType, UserId};

use crate::views::{HomeView, QuizView, ReportView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:test_type", QuizView)] Quiz { test_type: TestType },
        #[route("/report/:user_id/:test_type", ReportView)] Report { user_id: UserId, test_type: TestType },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Personality Assessment" }
            Link { to: Route::Home {}, "All tests" }
        }
    }
}
