use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

const FEATURES: [(&str, &str); 4] = [
    ("Adaptive timetable", "A weekly plan shaped around your weakest subjects."),
    ("Practice quizzes", "Biology questions with explanations after every answer."),
    ("Study assistant", "Ask questions and get short, focused answers."),
    ("Community forum", "Share notes and find study partners."),
];

#[component]
pub fn OnboardingView() -> Element {
    let ctx = use_context::<AppContext>();
    let signed_in = ctx.session().is_some();

    rsx! {
        div { class: "page onboarding",
            h1 { class: "brand brand-lg", "BrainBridge" }
            p { class: "tagline", "Bridge the gap between where you are and where you want to be." }

            ul { class: "feature-list",
                for (title, blurb) in FEATURES {
                    li {
                        strong { "{title}" }
                        span { "{blurb}" }
                    }
                }
            }

            div { class: "actions",
                if signed_in {
                    Link { class: "button primary", to: Route::Dashboard {}, "Continue" }
                } else {
                    Link { class: "button primary", to: Route::Login {}, "Log In" }
                    Link { class: "button secondary", to: Route::Register {}, "Sign Up" }
                }
            }
        }
    }
}
