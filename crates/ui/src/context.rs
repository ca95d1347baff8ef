use std::sync::Arc;

use bridge_core::gate::GateState;
use services::{
    AuthService, AuthSession, ChatService, Clock, DashboardService, ForumService,
    PlannerService, ProgressError, ProgressService,
};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn auth(&self) -> Arc<AuthService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn chat(&self) -> Arc<ChatService>;
    fn planner(&self) -> Arc<PlannerService>;
    fn forum(&self) -> Arc<ForumService>;
    fn dashboard(&self) -> Arc<DashboardService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,

    auth: Arc<AuthService>,
    progress: Arc<ProgressService>,
    chat: Arc<ChatService>,
    planner: Arc<PlannerService>,
    forum: Arc<ForumService>,
    dashboard: Arc<DashboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            auth: app.auth(),
            progress: app.progress(),
            chat: app.chat(),
            planner: app.planner(),
            forum: app.forum(),
            dashboard: app.dashboard(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }

    #[must_use]
    pub fn planner(&self) -> Arc<PlannerService> {
        Arc::clone(&self.planner)
    }

    #[must_use]
    pub fn forum(&self) -> Arc<ForumService> {
        Arc::clone(&self.forum)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn session(&self) -> Option<AuthSession> {
        self.auth.current_session()
    }

    /// Gate flags read fresh from the progress row.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the progress row cannot be loaded.
    pub async fn gate_state(&self) -> Result<GateState, ProgressError> {
        match self.auth.current_session() {
            None => Ok(GateState::signed_out()),
            Some(session) => self.progress.gate_state(session.user_id()).await,
        }
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
