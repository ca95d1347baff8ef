//! Weekly study timetable biased by per-subject strength.

use chrono::{NaiveTime, Weekday};
use rand::Rng;

use crate::scoring::IqScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    BiologyFundamentals,
    CellularFunctions,
    Genetics,
    Anatomy,
    MolecularBiology,
    Biochemistry,
    Ecology,
}

impl Subject {
    pub const ALL: [Subject; 7] = [
        Subject::BiologyFundamentals,
        Subject::CellularFunctions,
        Subject::Genetics,
        Subject::Anatomy,
        Subject::MolecularBiology,
        Subject::Biochemistry,
        Subject::Ecology,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Subject::BiologyFundamentals => "Biology Fundamentals",
            Subject::CellularFunctions => "Cellular Functions",
            Subject::Genetics => "Genetics",
            Subject::Anatomy => "Anatomy",
            Subject::MolecularBiology => "Molecular Biology",
            Subject::Biochemistry => "Biochemistry",
            Subject::Ecology => "Ecology",
        }
    }

    /// Strength used when no score has been drawn for the subject.
    #[must_use]
    pub fn default_strength(self) -> f64 {
        match self {
            Subject::BiologyFundamentals => 85.0,
            Subject::CellularFunctions => 70.0,
            Subject::Genetics => 60.0,
            Subject::Anatomy => 75.0,
            Subject::MolecularBiology => 65.0,
            Subject::Biochemistry => 80.0,
            Subject::Ecology => 90.0,
        }
    }
}

//
// ─── SUBJECT SCORES ────────────────────────────────────────────────────────────
//

pub const MIN_STRENGTH: f64 = 50.0;
pub const MAX_STRENGTH: f64 = 100.0;

/// Strength per subject, indexed in `Subject::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectScores([f64; 7]);

impl SubjectScores {
    #[must_use]
    pub fn defaults() -> Self {
        Self(Subject::ALL.map(Subject::default_strength))
    }

    /// Build from explicit strengths, clamped into `[MIN_STRENGTH, MAX_STRENGTH]`.
    #[must_use]
    pub fn from_strengths(values: [f64; 7]) -> Self {
        Self(values.map(clamp_strength))
    }

    /// Draw strengths around a base derived from the IQ score.
    ///
    /// Higher scores get a higher base and a tighter spread.
    pub fn from_iq<R: Rng + ?Sized>(iq: IqScore, rng: &mut R) -> Self {
        let iq = f64::from(iq.value());
        let variance = (30.0 - (iq - 80.0) / 2.0).max(5.0);
        let base = (iq - 15.0).clamp(60.0, 85.0);
        let mut values = [0.0; 7];
        for value in &mut values {
            let r: f64 = rng.random();
            *value = clamp_strength(base + (r - 0.5) * variance);
        }
        Self(values)
    }

    #[must_use]
    pub fn strength(&self, subject: Subject) -> f64 {
        self.0[subject as usize]
    }

    /// Subjects ordered weakest first; ties keep declaration order.
    #[must_use]
    pub fn weakest_first(&self) -> [Subject; 7] {
        let mut ordered = Subject::ALL;
        ordered.sort_by(|a, b| {
            self.strength(*a)
                .total_cmp(&self.strength(*b))
                .then(a.cmp(b))
        });
        ordered
    }
}

fn clamp_strength(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_STRENGTH;
    }
    value.clamp(MIN_STRENGTH, MAX_STRENGTH)
}

//
// ─── TIMETABLE ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    FocusedStudy,
    Practice,
    Revision,
    Quiz,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "Focus",
            Priority::Medium => "Regular",
            Priority::Low => "Review",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub subject: String,
    pub kind: SessionKind,
    pub priority: Priority,
}

impl StudySession {
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTimetable {
    sessions: Vec<StudySession>,
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const WEEKLY_QUIZ: &str = "Weekly Quiz (All Subjects)";

impl WeeklyTimetable {
    /// Lay out a week of sessions, weakest subjects in the prime morning slots.
    #[must_use]
    pub fn generate(scores: &SubjectScores) -> Self {
        let ranked = scores.weakest_first();
        let weakest = ranked[0].name();
        let second = ranked[1].name();
        let third = ranked[2].name();
        let fourth = ranked[3].name();
        let strongest = ranked[6].name();

        let mut sessions = Vec::with_capacity(54);
        for day in WEEK {
            let mut push = |start: (u32, u32), end: (u32, u32), subject: &str, kind, priority| {
                sessions.push(StudySession {
                    day,
                    start: hm(start),
                    end: hm(end),
                    subject: subject.to_string(),
                    kind,
                    priority,
                });
            };

            push((8, 0), (9, 30), weakest, SessionKind::FocusedStudy, Priority::High);
            push((10, 0), (11, 0), second, SessionKind::Practice, Priority::High);
            push((11, 0), (11, 30), "Break", SessionKind::Break, Priority::Medium);
            push((11, 30), (12, 30), third, SessionKind::Revision, Priority::Medium);
            push((12, 30), (13, 30), "Lunch Break", SessionKind::Break, Priority::Medium);
            push((13, 30), (14, 30), strongest, SessionKind::Revision, Priority::Low);
            if day == Weekday::Fri {
                push((15, 0), (16, 0), WEEKLY_QUIZ, SessionKind::Quiz, Priority::Medium);
            } else {
                push((15, 0), (16, 0), fourth, SessionKind::Practice, Priority::Medium);
            }
            if !matches!(day, Weekday::Sat | Weekday::Sun) {
                push((16, 30), (17, 30), third, SessionKind::FocusedStudy, Priority::High);
            }
        }

        Self { sessions }
    }

    #[must_use]
    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn for_day(&self, day: Weekday) -> impl Iterator<Item = &StudySession> {
        self.sessions.iter().filter(move |s| s.day == day)
    }

    /// Minutes of non-break study across the week.
    #[must_use]
    pub fn study_minutes(&self) -> i64 {
        self.sessions
            .iter()
            .filter(|s| s.kind != SessionKind::Break)
            .map(StudySession::duration_minutes)
            .sum()
    }
}

fn hm((h, m): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn drawn_strengths_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for iq in IqScore::MIN..=IqScore::MAX {
            let scores = SubjectScores::from_iq(IqScore::new(i64::from(iq)), &mut rng);
            for subject in Subject::ALL {
                let s = scores.strength(subject);
                assert!((MIN_STRENGTH..=MAX_STRENGTH).contains(&s), "{iq}: {s}");
            }
        }
    }

    #[test]
    fn high_iq_spread_is_tight() {
        // iq 120: variance = max(5, 30 - 20) = 10, base = 85 -> [80, 90]
        let mut rng = StdRng::seed_from_u64(99);
        let scores = SubjectScores::from_iq(IqScore::new(120), &mut rng);
        for subject in Subject::ALL {
            let s = scores.strength(subject);
            assert!((80.0..=90.0).contains(&s), "{s}");
        }
    }

    #[test]
    fn same_seed_same_scores() {
        let a = SubjectScores::from_iq(IqScore::new(97), &mut StdRng::seed_from_u64(3));
        let b = SubjectScores::from_iq(IqScore::new(97), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn defaults_rank_genetics_weakest_and_ecology_strongest() {
        let ranked = SubjectScores::defaults().weakest_first();
        assert_eq!(ranked[0], Subject::Genetics);
        assert_eq!(ranked[1], Subject::MolecularBiology);
        assert_eq!(ranked[6], Subject::Ecology);
    }

    #[test]
    fn week_has_fifty_four_sessions() {
        let table = WeeklyTimetable::generate(&SubjectScores::defaults());
        assert_eq!(table.sessions().len(), 54);
        assert_eq!(table.for_day(Weekday::Mon).count(), 8);
        assert_eq!(table.for_day(Weekday::Sun).count(), 7);
    }

    #[test]
    fn friday_afternoon_is_the_weekly_quiz() {
        let table = WeeklyTimetable::generate(&SubjectScores::defaults());
        let quiz = table
            .for_day(Weekday::Fri)
            .find(|s| s.start == NaiveTime::from_hms_opt(15, 0, 0).unwrap())
            .unwrap();
        assert_eq!(quiz.kind, SessionKind::Quiz);
        assert_eq!(quiz.subject, WEEKLY_QUIZ);
        let thursday = table
            .for_day(Weekday::Thu)
            .find(|s| s.start == NaiveTime::from_hms_opt(15, 0, 0).unwrap())
            .unwrap();
        assert_eq!(thursday.kind, SessionKind::Practice);
    }

    #[test]
    fn morning_slot_targets_weakest_subject() {
        let scores =
            SubjectScores::from_strengths([99.0, 98.0, 97.0, 96.0, 95.0, 51.0, 94.0]);
        let table = WeeklyTimetable::generate(&scores);
        let first = &table.sessions()[0];
        assert_eq!(first.subject, "Biochemistry");
        assert_eq!(first.priority, Priority::High);
        assert_eq!(first.duration_minutes(), 90);
    }

    #[test]
    fn study_minutes_excludes_breaks() {
        let table = WeeklyTimetable::generate(&SubjectScores::defaults());
        // weekday: 90 + 60 + 60 + 60 + 60 + 60 = 390; weekend: 330
        assert_eq!(table.study_minutes(), 5 * 390 + 2 * 330);
    }
}
