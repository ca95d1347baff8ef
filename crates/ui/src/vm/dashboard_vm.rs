use bridge_core::timetable::{Subject, SubjectScores};
use services::DashboardSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectStrengthVm {
    pub name: &'static str,
    pub percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub course_label: String,
    pub iq_label: String,
    pub completion_percent: u32,
    pub completion_label: String,
    pub stats: Vec<StatVm>,
    pub strengths: Vec<SubjectStrengthVm>,
}

impl From<&DashboardSnapshot> for DashboardVm {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        let course_label = snapshot
            .course
            .map_or_else(|| "No course selected".to_owned(), |c| c.name().to_owned());
        let iq_label = match (snapshot.iq_score, snapshot.iq_band()) {
            (Some(score), Some(band)) => format!("{} ({band})", score.value()),
            _ => "Not taken".to_owned(),
        };

        Self {
            greeting: format!(
                "{}, {}!",
                snapshot.time_of_day.greeting(),
                snapshot.first_name
            ),
            course_label,
            iq_label,
            completion_percent: snapshot.completion_percent,
            completion_label: format!(
                "{}/{} courses",
                snapshot.completed_courses, snapshot.total_courses
            ),
            stats: vec![
                StatVm {
                    label: "Average score",
                    value: format!("{}%", snapshot.average_score),
                },
                StatVm {
                    label: "Study hours",
                    value: snapshot.study_hours.to_string(),
                },
                StatVm {
                    label: "Quizzes taken",
                    value: snapshot.quizzes_taken.to_string(),
                },
            ],
            strengths: map_strengths(&snapshot.plan.scores),
        }
    }
}

#[must_use]
pub fn map_strengths(scores: &SubjectScores) -> Vec<SubjectStrengthVm> {
    Subject::ALL
        .iter()
        .map(|&subject| SubjectStrengthVm {
            name: subject.name(),
            percent: percent_of(scores.strength(subject)),
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_of(strength: f64) -> u32 {
    strength.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::model::Course;
    use bridge_core::scoring::IqScore;
    use bridge_core::timetable::WeeklyTimetable;
    use services::{StudyPlan, TimeOfDay};

    fn snapshot() -> DashboardSnapshot {
        let scores = SubjectScores::defaults();
        DashboardSnapshot {
            display_name: "Ada Lovelace".into(),
            first_name: "Ada".into(),
            course: Some(Course::Neet),
            iq_score: Some(IqScore::new(110)),
            total_courses: 20,
            completed_courses: 3,
            average_score: 72,
            study_hours: 3,
            quizzes_taken: 3,
            completion_percent: 15,
            time_of_day: TimeOfDay::Morning,
            plan: StudyPlan {
                iq_score: IqScore::new(110),
                timetable: WeeklyTimetable::generate(&scores),
                scores,
            },
        }
    }

    #[test]
    fn greeting_and_labels() {
        let vm = DashboardVm::from(&snapshot());
        assert_eq!(vm.greeting, "Good morning, Ada!");
        assert_eq!(vm.course_label, "NEET");
        assert_eq!(vm.iq_label, "110 (Above average)");
        assert_eq!(vm.completion_label, "3/20 courses");
        assert_eq!(vm.stats[0].value, "72%");
    }

    #[test]
    fn missing_iq_and_course_have_placeholders() {
        let mut snap = snapshot();
        snap.iq_score = None;
        snap.course = None;
        let vm = DashboardVm::from(&snap);
        assert_eq!(vm.iq_label, "Not taken");
        assert_eq!(vm.course_label, "No course selected");
    }

    #[test]
    fn strengths_follow_subject_order() {
        let strengths = map_strengths(&SubjectScores::defaults());
        assert_eq!(strengths.len(), 7);
        assert_eq!(strengths[0].percent, 85);
        assert_eq!(strengths[6].percent, 90);
    }
}
