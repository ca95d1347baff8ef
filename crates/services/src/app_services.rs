use std::sync::Arc;

use bridge_core::gate::GateState;
use bridge_core::model::{TodoDraft, UserId};
use chrono::Duration;
use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::{AuthService, SignUpRequest};
use crate::chat_service::{ChatConfig, ChatService};
use crate::dashboard_service::DashboardService;
use crate::error::{AppServicesError, AuthError, ProgressError};
use crate::forum_service::ForumService;
use crate::planner_service::PlannerService;
use crate::progress_service::ProgressService;
use crate::study_plan_service::StudyPlanService;

pub const DEMO_EMAIL: &str = "demo@brainbridge.app";
pub const DEMO_PASSWORD: &str = "brainbridge";

/// What `seed_demo_data` added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub forum_posts: usize,
    pub demo_account_created: bool,
    pub todos: usize,
}

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    auth: Arc<AuthService>,
    progress: Arc<ProgressService>,
    chat: Arc<ChatService>,
    planner: Arc<PlannerService>,
    forum: Arc<ForumService>,
    study_plans: Arc<StudyPlanService>,
    dashboard: Arc<DashboardService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, chat: Option<ChatConfig>) -> Self {
        let progress = ProgressService::new(Arc::clone(&storage.progress));
        let study_plans = StudyPlanService::new(progress.clone());
        let dashboard = DashboardService::new(clock, progress.clone(), study_plans.clone());
        let auth = AuthService::new(
            clock,
            Arc::clone(&storage.profiles),
            Arc::clone(&storage.credentials),
            progress.clone(),
        );
        Self {
            clock,
            auth: Arc::new(auth),
            progress: Arc::new(progress),
            chat: Arc::new(ChatService::new(chat)),
            planner: Arc::new(PlannerService::new(clock, Arc::clone(&storage.todos))),
            forum: Arc::new(ForumService::new(clock, Arc::clone(&storage.forum))),
            study_plans: Arc::new(study_plans),
            dashboard: Arc::new(dashboard),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        chat: Option<ChatConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock, chat))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), clock, None)
    }

    /// Swap in different argon2 cost parameters for password hashing.
    #[must_use]
    pub fn with_hash_params(mut self, params: argon2::Params) -> Self {
        self.auth = Arc::new(self.auth.as_ref().clone().with_hash_params(params));
        self
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
    pub fn study_plans(&self) -> Arc<StudyPlanService> {
        Arc::clone(&self.study_plans)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    /// Gate flags for whoever is signed in right now.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the progress row cannot be loaded.
    pub async fn gate_state(&self) -> Result<GateState, ProgressError> {
        match self.auth.current_session() {
            Some(session) => self.progress.gate_state(session.user_id()).await,
            None => Ok(GateState::signed_out()),
        }
    }

    /// Sample forum threads plus a demo account with a few tasks.
    ///
    /// Safe to run repeatedly; existing data is left alone.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if any write fails.
    pub async fn seed_demo_data(&self) -> Result<SeedReport, AppServicesError> {
        let mut report = SeedReport {
            forum_posts: self.forum.seed_samples().await?,
            ..SeedReport::default()
        };

        let signed_up = self
            .auth
            .sign_up(SignUpRequest {
                email: DEMO_EMAIL.into(),
                password: DEMO_PASSWORD.into(),
                first_name: "Demo".into(),
                last_name: "Student".into(),
            })
            .await;
        let session = match signed_up {
            Ok(session) => session,
            Err(AuthError::EmailTaken) => {
                self.auth.sign_out();
                tracing::info!("demo account already present");
                return Ok(report);
            }
            Err(err) => return Err(err.into()),
        };
        report.demo_account_created = true;

        report.todos = self.seed_todos(session.user_id()).await?;
        self.auth.sign_out();
        Ok(report)
    }

    async fn seed_todos(&self, user_id: UserId) -> Result<usize, AppServicesError> {
        let today = self.clock.today();
        let drafts = [
            ("Review cell organelles", Some(today)),
            ("Practice genetics problems", Some(today + Duration::days(1))),
            ("Take the weekly quiz", Some(today + Duration::days(4))),
        ];
        for (title, due) in &drafts {
            self.planner
                .add(user_id, TodoDraft::new(*title, *due))
                .await?;
        }
        Ok(drafts.len())
    }
}
