use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::toast::use_toast_provider;

#[component]
pub fn App() -> Element {
    use_toast_provider();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable window title; pages render their own headings.
        document::Title { "BrainBridge" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
