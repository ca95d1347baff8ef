use chrono::Weekday;

use bridge_core::timetable::{SessionKind, StudySession, WeeklyTimetable};

use crate::vm::time_fmt::{format_time_range, weekday_name};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub time_range: String,
    pub subject: String,
    pub kind_label: &'static str,
    pub priority_label: &'static str,
    pub css_class: &'static str,
    pub duration_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimetableDayVm {
    pub day: Weekday,
    pub day_label: &'static str,
    pub sessions: Vec<SessionRowVm>,
}

impl From<&StudySession> for SessionRowVm {
    fn from(session: &StudySession) -> Self {
        let is_break = session.kind == SessionKind::Break;
        Self {
            time_range: format_time_range(session.start, session.end),
            subject: session.subject.clone(),
            kind_label: kind_label(session.kind),
            priority_label: if is_break { "" } else { session.priority.label() },
            css_class: if is_break { "slot slot-break" } else { priority_class(session) },
            duration_label: format!("{} min", session.duration_minutes()),
        }
    }
}

fn kind_label(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::FocusedStudy => "Focused study",
        SessionKind::Practice => "Practice",
        SessionKind::Revision => "Revision",
        SessionKind::Quiz => "Quiz",
        SessionKind::Break => "Break",
    }
}

fn priority_class(session: &StudySession) -> &'static str {
    use bridge_core::timetable::Priority;
    match session.priority {
        Priority::High => "slot slot-high",
        Priority::Medium => "slot slot-medium",
        Priority::Low => "slot slot-low",
    }
}

/// One column per weekday, Monday first.
#[must_use]
pub fn map_timetable(timetable: &WeeklyTimetable) -> Vec<TimetableDayVm> {
    WEEK.iter()
        .map(|&day| TimetableDayVm {
            day,
            day_label: weekday_name(day),
            sessions: timetable.for_day(day).map(SessionRowVm::from).collect(),
        })
        .collect()
}

/// Weekly non-break study time as "Xh Ym".
#[must_use]
pub fn weekly_study_label(timetable: &WeeklyTimetable) -> String {
    let minutes = timetable.study_minutes();
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
