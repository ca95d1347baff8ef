use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};

use bridge_core::gate::{Destination, GateDecision, resolve};

use crate::context::AppContext;
use crate::toast::{ToastList, use_toasts};
use crate::views::{
    ChatbotView, CourseSelectionView, DashboardView, ForumView, IqTestView, LoginView,
    NotFoundView, OnboardingView, ProfileView, QuizView, RegisterView, TodoView, ViewError,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", OnboardingView)] Onboarding {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[route("/iq-test", IqTestView)] IqTest {},
        #[route("/course-selection", CourseSelectionView)] CourseSelection {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/chatbot", ChatbotView)] Chatbot {},
        #[route("/todo", TodoView)] Todo {},
        #[route("/forum", ForumView)] Forum {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

impl Route {
    #[must_use]
    pub fn destination(&self) -> Destination {
        match self {
            Route::Onboarding {} => Destination::Onboarding,
            Route::Login {} => Destination::Login,
            Route::Register {} => Destination::Register,
            Route::IqTest {} => Destination::IqTest,
            Route::CourseSelection {} => Destination::CourseSelection,
            Route::Dashboard {} => Destination::Dashboard,
            Route::Quiz {} => Destination::Quiz,
            Route::Chatbot {} => Destination::Chatbot,
            Route::Todo {} => Destination::Todo,
            Route::Forum {} => Destination::Forum,
            Route::Profile {} => Destination::Profile,
            Route::NotFound { .. } => Destination::NotFound,
        }
    }

    #[must_use]
    pub fn from_destination(destination: Destination) -> Self {
        match destination {
            Destination::Onboarding => Route::Onboarding {},
            Destination::Login => Route::Login {},
            Destination::Register => Route::Register {},
            Destination::IqTest => Route::IqTest {},
            Destination::CourseSelection => Route::CourseSelection {},
            Destination::Dashboard => Route::Dashboard {},
            Destination::Quiz => Route::Quiz {},
            Destination::Chatbot => Route::Chatbot {},
            Destination::Todo => Route::Todo {},
            Destination::Forum => Route::Forum {},
            Destination::Profile => Route::Profile {},
            Destination::NotFound => Route::NotFound {
                segments: vec!["404".to_owned()],
            },
        }
    }
}

/// Re-checks the gate on every navigation and replaces the route on redirect.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let route = use_route::<Route>();
    let destination = route.destination();
    let navigator = use_navigator();

    let gate_ctx = ctx.clone();
    let gate = use_resource(use_reactive!(|(destination,)| {
        let ctx = gate_ctx.clone();
        async move {
            let state = ctx.gate_state().await.map_err(|err| {
                tracing::warn!(error = %err, "gate state unavailable");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(resolve(state, destination))
        }
    }));

    use_effect(move || {
        let decision = gate.read().as_ref().and_then(|r| r.as_ref().ok().copied());
        if let Some(GateDecision::Redirect(target)) = decision {
            navigator.replace(Route::from_destination(target));
        }
    });

    let allowed = destination.is_public()
        || matches!(gate.read().as_ref(), Some(Ok(GateDecision::Allow)));
    let failed = matches!(gate.read().as_ref(), Some(Err(_)));
    let show_nav = ctx.session().is_some() && !destination.is_public();

    rsx! {
        div { class: "app",
            if show_nav {
                NavBar { current: destination }
            }
            main { class: "content",
                if allowed {
                    Outlet::<Route> {}
                } else if failed {
                    p { class: "page-error", {ViewError::Unknown.message()} }
                } else {
                    p { class: "page-loading", "Loading..." }
                }
            }
            ToastList {}
        }
    }
}

const NAV_ITEMS: [(Destination, &str); 6] = [
    (Destination::Dashboard, "Dashboard"),
    (Destination::Quiz, "Quiz"),
    (Destination::Chatbot, "Study Assistant"),
    (Destination::Todo, "Planner"),
    (Destination::Forum, "Forum"),
    (Destination::Profile, "Profile"),
];

#[component]
fn NavBar(current: Destination) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut toasts = use_toasts();
    let name = ctx
        .session()
        .map(|s| s.profile.first_name().to_owned())
        .unwrap_or_default();

    let sign_out = move |_| {
        ctx.auth().sign_out();
        toasts.info("Signed out");
        navigator.replace(Route::Login {});
    };

    rsx! {
        nav { class: "navbar",
            h1 { class: "brand", "BrainBridge" }
            ul {
                for (destination, label) in NAV_ITEMS {
                    li {
                        class: if destination == current { "active" } else { "" },
                        Link { to: Route::from_destination(destination), "{label}" }
                    }
                }
            }
            div { class: "navbar-user",
                span { "{name}" }
                button { class: "link-button", r#type: "button", onclick: sign_out, "Log out" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_destination_round_trips_through_a_route() {
        let all = [
            Destination::Onboarding,
            Destination::Login,
            Destination::Register,
            Destination::IqTest,
            Destination::CourseSelection,
            Destination::Dashboard,
            Destination::Quiz,
            Destination::Chatbot,
            Destination::Todo,
            Destination::Forum,
            Destination::Profile,
            Destination::NotFound,
        ];
        for destination in all {
            let route = Route::from_destination(destination);
            assert_eq!(route.destination(), destination);
        }
    }

    #[test]
    fn route_paths_match_gate_paths() {
        for destination in [
            Destination::Onboarding,
            Destination::IqTest,
            Destination::CourseSelection,
            Destination::Chatbot,
        ] {
            assert_eq!(
                Route::from_destination(destination).to_string(),
                destination.path()
            );
        }
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        let route: Route = "/nowhere/else".parse().expect("catch-all");
        assert_eq!(route.destination(), Destination::NotFound);
    }
}
