use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use bridge_core::model::ProfileUpdate;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::use_toasts;
use crate::views::ViewError;
use crate::vm::auth_error_message;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    let session = ctx.session();
    let profile = session.as_ref().map(|s| s.profile.clone());
    let mut first_name = use_signal(|| {
        profile
            .as_ref()
            .map(|p| p.first_name().to_owned())
            .unwrap_or_default()
    });
    let mut last_name = use_signal(|| {
        profile
            .as_ref()
            .map(|p| p.last_name().to_owned())
            .unwrap_or_default()
    });
    let mut email = use_signal(|| {
        profile
            .as_ref()
            .map(|p| p.email().as_str().to_owned())
            .unwrap_or_default()
    });
    let mut busy = use_signal(|| false);

    let save_ctx = ctx.clone();
    let save = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let Some(profile) = profile.as_ref() else {
            return;
        };
        let update = ProfileUpdate {
            first_name: changed(first_name(), profile.first_name()),
            last_name: changed(last_name(), profile.last_name()),
            email: changed(email(), profile.email().as_str()),
        };
        if update.is_empty() {
            toasts.info("Nothing to update");
            return;
        }
        busy.set(true);
        let auth = save_ctx.auth();
        spawn(async move {
            match auth.update_profile(update).await {
                Ok(_) => toasts.success("Profile updated successfully!"),
                Err(err) => toasts.error(auth_error_message(&err)),
            }
            busy.set(false);
        });
    };

    let sign_out = move |_| {
        ctx.auth().sign_out();
        toasts.info("Signed out");
        navigator.replace(Route::Login {});
    };

    let Some(session) = session else {
        return rsx! { p { class: "page-error", {ViewError::SignedOut.message()} } };
    };
    let display_name = session.profile.display_name();
    let iq = session
        .progress
        .iq_score
        .map_or_else(|| "Not taken".to_owned(), |s| format!("{} ({})", s.value(), s.band()));
    let course = session
        .progress
        .selected_course
        .map_or("None", |c| c.name());

    rsx! {
        div { class: "page profile",
            h1 { "Profile" }

            section { class: "card",
                h2 { "{display_name}" }
                dl {
                    dt { "IQ score" }
                    dd { "{iq}" }
                    dt { "Course" }
                    dd {
                        "{course} "
                        Link { to: Route::CourseSelection {}, "Change" }
                    }
                    dt { "Quizzes taken" }
                    dd { "{session.progress.quizzes_taken}" }
                }
            }

            section { class: "card",
                h2 { "Personal Information" }
                form { class: "profile-form", onsubmit: save,
                    label { r#for: "first-name", "First name" }
                    input {
                        id: "first-name",
                        r#type: "text",
                        value: "{first_name}",
                        oninput: move |evt| first_name.set(evt.value()),
                    }
                    label { r#for: "last-name", "Last name" }
                    input {
                        id: "last-name",
                        r#type: "text",
                        value: "{last_name}",
                        oninput: move |evt| last_name.set(evt.value()),
                    }
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                    button { class: "button primary", r#type: "submit", disabled: busy(), "Save changes" }
                }
            }

            button { class: "button secondary", r#type: "button", onclick: sign_out, "Log out" }
        }
    }
}

fn changed(value: String, current: &str) -> Option<String> {
    (value.trim() != current).then_some(value)
}
