use std::sync::Arc;

use argon2::Params;
use bridge_core::model::Course;
use bridge_core::scoring::IqScore;
use bridge_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, AuthService, AuthSession, ChatService, Clock, DashboardService, ForumService,
    PlannerService, ProgressService, SignUpRequest,
};

use crate::context::{UiApp, build_app_context};
use crate::toast::use_toast_provider;
use crate::views::{
    ChatbotView, CourseSelectionView, DashboardView, ForumView, IqTestView, LoginView,
    NotFoundView, OnboardingView, ProfileView, QuizView, RegisterView, TodoView,
};

struct TestApp {
    services: Arc<AppServices>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn planner(&self) -> Arc<PlannerService> {
        self.services.planner()
    }

    fn forum(&self) -> Arc<ForumService> {
        self.services.forum()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Onboarding,
    Login,
    Register,
    IqTest,
    CourseSelection,
    Dashboard,
    Quiz,
    Chatbot,
    Todo,
    Forum,
    Profile,
    NotFound,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_toast_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Onboarding => rsx! { OnboardingView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Register => rsx! { RegisterView {} },
        ViewKind::IqTest => rsx! { IqTestView {} },
        ViewKind::CourseSelection => rsx! { CourseSelectionView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Chatbot => rsx! { ChatbotView {} },
        ViewKind::Todo => rsx! { TodoView {} },
        ViewKind::Forum => rsx! { ForumView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::NotFound => rsx! {
            NotFoundView { segments: vec!["missing".to_owned(), "page".to_owned()] }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Rebuild, then let pending resources settle until `needle` shows up.
    pub async fn render_until(&mut self, needle: &str) -> String {
        self.rebuild();
        for _ in 0..10 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// In-memory services on the fixed test clock with cheap password hashing.
pub fn test_services() -> Arc<AppServices> {
    let params = Params::new(1024, 1, 1, None).expect("params");
    Arc::new(AppServices::in_memory(Clock::fixed(fixed_now())).with_hash_params(params))
}

/// Register and sign in a learner; optionally finish the onboarding gate.
pub async fn sign_up_learner(services: &AppServices, onboarded: bool) -> AuthSession {
    let session = services
        .auth()
        .sign_up(SignUpRequest {
            email: "ada@example.com".into(),
            password: "analytical".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        })
        .await
        .expect("sign up");
    if !onboarded {
        return session;
    }
    let progress = services.progress();
    progress
        .save_iq_result(session.user_id(), IqScore::new(110))
        .await
        .expect("save iq");
    progress
        .select_course(session.user_id(), Course::Neet)
        .await
        .expect("select course");
    services.auth().refresh_session().await.expect("refresh")
}

pub fn mount(view: ViewKind, services: Arc<AppServices>) -> ViewHarness {
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
