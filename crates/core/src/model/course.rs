use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exam-preparation tracks offered after the IQ test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    Neet,
    Jee,
    Gre,
    Gate,
    Toefl,
}

impl Course {
    /// Display order on the course selection page.
    pub const ALL: [Course; 5] = [
        Course::Neet,
        Course::Jee,
        Course::Gre,
        Course::Gate,
        Course::Toefl,
    ];

    /// Stable lower-case code used in storage.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Course::Neet => "neet",
            Course::Jee => "jee",
            Course::Gre => "gre",
            Course::Gate => "gate",
            Course::Toefl => "toefl",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Course::Neet => "NEET",
            Course::Jee => "JEE",
            Course::Gre => "GRE",
            Course::Gate => "GATE",
            Course::Toefl => "TOEFL",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Course::Neet => "National Eligibility cum Entrance Test for Medical Programs",
            Course::Jee => "Joint Entrance Examination for Engineering Programs",
            Course::Gre => "Graduate Record Examination for Graduate Studies",
            Course::Gate => "Graduate Aptitude Test in Engineering",
            Course::Toefl => "Test of English as a Foreign Language",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCourseError(String);

impl fmt::Display for ParseCourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown course code: {}", self.0)
    }
}

impl std::error::Error for ParseCourseError {}

impl FromStr for Course {
    type Err = ParseCourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Course::ALL
            .into_iter()
            .find(|course| course.code() == code)
            .ok_or_else(|| ParseCourseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("NEET".parse::<Course>().unwrap(), Course::Neet);
        assert_eq!(" toefl ".parse::<Course>().unwrap(), Course::Toefl);
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "mcat".parse::<Course>().unwrap_err();
        assert_eq!(err.to_string(), "unknown course code: mcat");
    }

    #[test]
    fn code_round_trips_for_every_course() {
        for course in Course::ALL {
            assert_eq!(course.code().parse::<Course>().unwrap(), course);
        }
    }
}
