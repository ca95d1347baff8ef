mod chatbot;
mod course_selection;
mod dashboard;
mod forum;
mod login;
mod not_found;
mod onboarding;
mod profile;
mod quiz;
mod register;
mod state;
mod todo;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chatbot::ChatbotView;
pub use course_selection::CourseSelectionView;
pub use dashboard::DashboardView;
pub use forum::ForumView;
pub use iq_test::IqTestView;
pub use login::LoginView;
pub use not_found::NotFoundView;
pub use onboarding::OnboardingView;
pub use profile::ProfileView;
pub use quiz::QuizView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use todo::TodoView;
