use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::use_toasts;
use crate::vm::{RegisterForm, RegisterFormErrors, auth_error_message};

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    let mut form = use_signal(RegisterForm::default);
    let mut errors = use_signal(RegisterFormErrors::default);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(RegisterFormErrors::default());
        busy.set(true);

        let auth = ctx.auth();
        spawn(async move {
            match auth.sign_up(request).await {
                Ok(session) => {
                    toasts.success("Registration successful");
                    navigator.replace(Route::from_destination(session.landing));
                }
                Err(err) => toasts.error(auth_error_message(&err)),
            }
            busy.set(false);
        });
    };

    let current = form.read().clone();
    let field_errors = errors.read().clone();

    rsx! {
        div { class: "page auth-page",
            h2 { "Welcome!" }
            p { class: "muted", "Create an account to get started." }

            form { class: "auth-form", onsubmit: submit,
                TextField {
                    id: "first-name",
                    label: "First name",
                    kind: "text",
                    value: current.first_name,
                    error: field_errors.first_name,
                    oninput: move |v| form.write().first_name = v,
                }
                TextField {
                    id: "last-name",
                    label: "Last name",
                    kind: "text",
                    value: current.last_name,
                    error: field_errors.last_name,
                    oninput: move |v| form.write().last_name = v,
                }
                TextField {
                    id: "email",
                    label: "Email",
                    kind: "email",
                    value: current.email,
                    error: field_errors.email,
                    oninput: move |v| form.write().email = v,
                }
                TextField {
                    id: "password",
                    label: "Password",
                    kind: "password",
                    value: current.password,
                    error: field_errors.password,
                    oninput: move |v| form.write().password = v,
                }
                TextField {
                    id: "confirm-password",
                    label: "Confirm password",
                    kind: "password",
                    value: current.confirm_password,
                    error: field_errors.confirm_password,
                    oninput: move |v| form.write().confirm_password = v,
                }

                label { class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: current.agree_to_terms,
                        onchange: move |evt| form.write().agree_to_terms = evt.checked(),
                    }
                    " I agree to the terms and privacy policy"
                }
                if let Some(message) = field_errors.agree_to_terms {
                    p { class: "form-error", "{message}" }
                }

                button { class: "button primary", r#type: "submit", disabled: busy(),
                    if busy() { "Creating account..." } else { "Sign Up" }
                }
            }

            p { class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    value: String,
    error: Option<&'static str>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { r#for: id, "{label}" }
            input {
                id: id,
                r#type: kind,
                class: if error.is_some() { "invalid" } else { "" },
                value: "{value}",
                oninput: move |evt| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "form-error", "{message}" }
            }
        }
    }
}
