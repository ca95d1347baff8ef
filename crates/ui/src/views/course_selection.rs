use dioxus::prelude::*;
use dioxus_router::use_navigator;

use bridge_core::model::Course;
use services::ProgressError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::use_toasts;
use crate::views::ViewError;

#[component]
pub fn CourseSelectionView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    let initial = ctx
        .session()
        .and_then(|s| s.progress.selected_course);
    let mut selected = use_signal(move || initial);
    let mut busy = use_signal(|| false);

    let confirm = move |_| {
        if busy() {
            return;
        }
        let Some(course) = selected() else {
            toasts.error("Please select a course to continue");
            return;
        };
        let Some(current) = ctx.session() else {
            toasts.error(ViewError::SignedOut.message());
            return;
        };
        busy.set(true);
        let progress = ctx.progress();
        let auth = ctx.auth();
        spawn(async move {
            match progress.select_course(current.user_id(), course).await {
                Ok(_) => {
                    if let Err(err) = auth.refresh_session().await {
                        tracing::warn!(error = %err, "session refresh failed");
                    }
                    toasts.success(format!("You've selected {}!", course.name()));
                    navigator.replace(Route::Dashboard {});
                }
                Err(ProgressError::IqTestRequired) => {
                    toasts.error("Please complete the IQ test first");
                    navigator.replace(Route::IqTest {});
                }
                Err(err) => {
                    tracing::warn!(error = %err, "course selection failed");
                    toasts.error(ViewError::Unknown.message());
                }
            }
            busy.set(false);
        });
    };

    let current = selected();

    rsx! {
        div { class: "page course-selection",
            h1 { "Choose Your Course" }
            p { class: "muted", "Pick the exam you are preparing for. You can change it later." }

            div { class: "course-grid",
                for course in Course::ALL {
                    button {
                        key: "{course.code()}",
                        r#type: "button",
                        class: if current == Some(course) { "course-card selected" } else { "course-card" },
                        onclick: move |_| selected.set(Some(course)),
                        h3 { "{course.name()}" }
                        p { "{course.description()}" }
                    }
                }
            }

            button {
                class: "button primary",
                r#type: "button",
                disabled: busy(),
                onclick: confirm,
                "Continue"
            }
        }
    }
}
