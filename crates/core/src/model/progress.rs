use crate::gate::GateState;
use crate::model::course::Course;
use crate::model::ids::UserId;
use crate::scoring::IqScore;

/// Course total assigned to a freshly created progress row.
pub const DEFAULT_TOTAL_COURSES: u32 = 20;

/// Per-user progress row. Created on first access and updated on events.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProgress {
    pub user_id: UserId,
    pub total_courses: u32,
    pub completed_courses: u32,
    pub average_score: u32,
    pub study_hours: u32,
    pub quizzes_taken: u32,
    pub iq_score: Option<IqScore>,
    pub selected_course: Option<Course>,
}

/// Partial update; only `Some` fields overwrite the stored row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressUpdate {
    pub total_courses: Option<u32>,
    pub completed_courses: Option<u32>,
    pub average_score: Option<u32>,
    pub study_hours: Option<u32>,
    pub iq_score: Option<IqScore>,
    pub selected_course: Option<Course>,
}

impl UserProgress {
    #[must_use]
    pub fn new_default(user_id: UserId) -> Self {
        Self {
            user_id,
            total_courses: DEFAULT_TOTAL_COURSES,
            completed_courses: 0,
            average_score: 0,
            study_hours: 0,
            quizzes_taken: 0,
            iq_score: None,
            selected_course: None,
        }
    }

    pub fn apply(&mut self, update: ProgressUpdate) {
        if let Some(total) = update.total_courses {
            self.total_courses = total;
        }
        if let Some(completed) = update.completed_courses {
            self.completed_courses = completed;
        }
        if let Some(avg) = update.average_score {
            self.average_score = avg.min(100);
        }
        if let Some(hours) = update.study_hours {
            self.study_hours = hours;
        }
        if let Some(score) = update.iq_score {
            self.iq_score = Some(score);
        }
        if let Some(course) = update.selected_course {
            self.selected_course = Some(course);
        }
    }

    /// Fold a finished quiz into the running counters.
    ///
    /// The average is `round((avg * n + score) / (n + 1))` over quizzes taken.
    pub fn record_quiz(&mut self, score_percent: u32) {
        let score = u64::from(score_percent.min(100));
        let taken = u64::from(self.quizzes_taken);
        let sum = u64::from(self.average_score) * taken + score;
        let divisor = taken + 1;
        let rounded = (sum * 2 + divisor) / (divisor * 2);

        self.average_score = u32::try_from(rounded).unwrap_or(100);
        self.quizzes_taken = self.quizzes_taken.saturating_add(1);
        self.completed_courses = self.completed_courses.saturating_add(1);
        self.study_hours = self.study_hours.saturating_add(1);
    }

    /// Completed share of total courses as a whole percent, 0 when there are no courses.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        if self.total_courses == 0 {
            return 0;
        }
        let pct = u64::from(self.completed_courses) * 100 / u64::from(self.total_courses);
        u32::try_from(pct.min(100)).unwrap_or(100)
    }

    #[must_use]
    pub fn gate_state(&self) -> GateState {
        GateState {
            authenticated: true,
            iq_test_completed: self.iq_score.is_some(),
            course_selected: self.selected_course.is_some(),
        }
    }
}
