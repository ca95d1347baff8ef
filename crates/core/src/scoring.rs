//! Synthetic IQ score derived from answer correctness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score in the closed range `[IqScore::MIN, IqScore::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IqScore(u8);

impl IqScore {
    pub const MIN: u8 = 80;
    pub const MAX: u8 = 120;
    const SPAN: f64 = 40.0;

    /// Builds a score, clamping into `[MIN, MAX]`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// `round(80 + correct / total * 40)`.
    ///
    /// A test with no questions scores the floor, and `correct` is capped at `total`.
    #[must_use]
    pub fn from_answers(correct: u32, total: u32) -> Self {
        if total == 0 {
            return Self(Self::MIN);
        }
        let ratio = f64::from(correct.min(total)) / f64::from(total);
        #[allow(clippy::cast_possible_truncation)]
        let raw = (f64::from(Self::MIN) + ratio * Self::SPAN).round() as i64;
        Self::new(raw)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn band(self) -> &'static str {
        match self.0 {
            0..=89 => "Below average",
            90..=109 => "Average",
            110..=119 => "Above average",
            _ => "Superior",
        }
    }
}

impl Default for IqScore {
    /// Neutral score used when a user has not taken the test.
    fn default() -> Self {
        Self(100)
    }
}

impl fmt::Display for IqScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_and_zero_hit_the_bounds() {
        assert_eq!(IqScore::from_answers(8, 8).value(), 120);
        assert_eq!(IqScore::from_answers(0, 8).value(), 80);
    }

    #[test]
    fn rounds_half_way_ratios() {
        // 80 + 3/8 * 40 = 95
        assert_eq!(IqScore::from_answers(3, 8).value(), 95);
        // 80 + 1/3 * 40 = 93.33
        assert_eq!(IqScore::from_answers(1, 3).value(), 93);
        // 80 + 2/3 * 40 = 106.67
        assert_eq!(IqScore::from_answers(2, 3).value(), 107);
    }

    #[test]
    fn empty_test_scores_floor() {
        assert_eq!(IqScore::from_answers(0, 0).value(), IqScore::MIN);
    }

    #[test]
    fn correct_is_capped_at_total() {
        assert_eq!(IqScore::from_answers(12, 8).value(), IqScore::MAX);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        assert_eq!(IqScore::new(-5).value(), 80);
        assert_eq!(IqScore::new(250).value(), 120);
        assert_eq!(IqScore::new(101).value(), 101);
    }

    #[test]
    fn every_ratio_stays_in_range() {
        for total in 1..=20 {
            for correct in 0..=total {
                let score = IqScore::from_answers(correct, total).value();
                assert!((IqScore::MIN..=IqScore::MAX).contains(&score));
            }
        }
    }

    #[test]
    fn bands() {
        assert_eq!(IqScore::new(80).band(), "Below average");
        assert_eq!(IqScore::new(100).band(), "Average");
        assert_eq!(IqScore::new(115).band(), "Above average");
        assert_eq!(IqScore::new(120).band(), "Superior");
    }
}
