use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div { class: "page not-found",
            h1 { "404" }
            h2 { "Page not found" }
            p { class: "muted", "Nothing lives at {path}." }
            Link { class: "button primary", to: Route::Onboarding {}, "Go home" }
        }
    }
}
