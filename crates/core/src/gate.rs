//! Access gate for the page tree.
//!
//! A signed-in user must finish the IQ test, then pick a course, before the
//! rest of the app opens up. The flags are derived from the progress row.

/// Every page the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
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

impl Destination {
    /// Pages reachable without signing in.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(
            self,
            Destination::Onboarding
                | Destination::Login
                | Destination::Register
                | Destination::NotFound
        )
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Destination::Onboarding => "/",
            Destination::Login => "/login",
            Destination::Register => "/register",
            Destination::IqTest => "/iq-test",
            Destination::CourseSelection => "/course-selection",
            Destination::Dashboard => "/dashboard",
            Destination::Quiz => "/quiz",
            Destination::Chatbot => "/chatbot",
            Destination::Todo => "/todo",
            Destination::Forum => "/forum",
            Destination::Profile => "/profile",
            Destination::NotFound => "/404",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateState {
    pub authenticated: bool,
    pub iq_test_completed: bool,
    pub course_selected: bool,
}

impl GateState {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_fully_onboarded(self) -> bool {
        self.authenticated && self.iq_test_completed && self.course_selected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(Destination),
}

/// Decide whether `requested` may be shown for `state`.
#[must_use]
pub fn resolve(state: GateState, requested: Destination) -> GateDecision {
    if requested.is_public() {
        return GateDecision::Allow;
    }
    if !state.authenticated {
        return GateDecision::Redirect(Destination::Login);
    }
    if !state.iq_test_completed {
        return if requested == Destination::IqTest {
            GateDecision::Allow
        } else {
            GateDecision::Redirect(Destination::IqTest)
        };
    }
    // The test cannot be retaken once scored.
    if requested == Destination::IqTest {
        return GateDecision::Redirect(Destination::CourseSelection);
    }
    if !state.course_selected && requested != Destination::CourseSelection {
        return GateDecision::Redirect(Destination::CourseSelection);
    }
    GateDecision::Allow
}

/// Where a user lands right after signing in.
#[must_use]
pub fn landing_after_sign_in(state: GateState) -> Destination {
    if !state.iq_test_completed {
        Destination::IqTest
    } else if !state.course_selected {
        Destination::CourseSelection
    } else {
        Destination::Dashboard
    }
}
