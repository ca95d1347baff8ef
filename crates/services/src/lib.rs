#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod chat_service;
pub mod dashboard_service;
pub mod error;
pub mod forum_service;
pub mod planner_service;
pub mod progress_service;
pub mod study_plan_service;

pub use bridge_core::Clock;

pub use app_services::{AppServices, SeedReport};
pub use auth_service::{AuthService, AuthSession, SignUpRequest};
pub use chat_service::{ChatConfig, ChatService, FALLBACK_REPLY};
pub use dashboard_service::{DashboardService, DashboardSnapshot, TimeOfDay};
pub use error::{
    AppServicesError, AuthError, ChatError, ForumError, PlannerError, ProgressError,
};
pub use forum_service::{CategorySummary, ForumService};
pub use planner_service::{PlannerService, TodoUpdate};
pub use progress_service::ProgressService;
pub use study_plan_service::{StudyPlan, StudyPlanService};
