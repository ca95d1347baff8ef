use bridge_core::model::{Course, UserProfile};
use bridge_core::scoring::IqScore;

use crate::Clock;
use crate::error::ProgressError;
use crate::progress_service::ProgressService;
use crate::study_plan_service::{StudyPlan, StudyPlanService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..12 => Self::Morning,
            12..18 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    #[must_use]
    pub fn greeting(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}

/// Everything the dashboard renders for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub display_name: String,
    pub first_name: String,
    pub course: Option<Course>,
    pub iq_score: Option<IqScore>,
    pub total_courses: u32,
    pub completed_courses: u32,
    pub average_score: u32,
    pub study_hours: u32,
    pub quizzes_taken: u32,
    pub completion_percent: u32,
    pub time_of_day: TimeOfDay,
    pub plan: StudyPlan,
}

impl DashboardSnapshot {
    /// Band label for the IQ score, if the test was taken.
    #[must_use]
    pub fn iq_band(&self) -> Option<&'static str> {
        self.iq_score.map(IqScore::band)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    progress: ProgressService,
    plans: StudyPlanService,
}

impl DashboardService {
    #[must_use]
    pub fn new(clock: Clock, progress: ProgressService, plans: StudyPlanService) -> Self {
        Self {
            clock,
            progress,
            plans,
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the progress row cannot be loaded.
    pub async fn snapshot(&self, profile: &UserProfile) -> Result<DashboardSnapshot, ProgressError> {
        let progress = self.progress.get_or_create(profile.id()).await?;
        let plan = self.plans.timetable_for(profile.id()).await?;
        Ok(DashboardSnapshot {
            display_name: profile.display_name(),
            first_name: profile.first_name().to_owned(),
            course: progress.selected_course,
            iq_score: progress.iq_score,
            total_courses: progress.total_courses,
            completed_courses: progress.completed_courses,
            average_score: progress.average_score,
            study_hours: progress.study_hours,
            quizzes_taken: progress.quizzes_taken,
            completion_percent: progress.completion_percent(),
            time_of_day: TimeOfDay::from_hour(self.clock.hour()),
            plan,
        })
    }
}
