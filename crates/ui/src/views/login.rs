use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::use_toasts;
use crate::vm::{LoginForm, auth_error_message};

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let form = LoginForm {
            email: email(),
            password: password(),
        };
        if let Err(message) = form.validate() {
            error.set(Some(message.to_owned()));
            return;
        }
        error.set(None);
        busy.set(true);

        let auth = ctx.auth();
        spawn(async move {
            match auth.sign_in(&form.email, &form.password).await {
                Ok(session) => {
                    toasts.success("Login successful");
                    navigator.replace(Route::from_destination(session.landing));
                }
                Err(err) => {
                    error.set(Some(auth_error_message(&err)));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Welcome back!" }
            p { class: "muted", "Log in to continue your studies." }

            form { class: "auth-form", onsubmit: submit,
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "button primary", r#type: "submit", disabled: busy(),
                    if busy() { "Logging in..." } else { "Log In" }
                }
            }

            p { class: "muted",
                "Don't have an account? "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
