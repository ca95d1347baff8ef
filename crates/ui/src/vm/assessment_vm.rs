use bridge_core::model::{IQ_TEST_DURATION_SECS, IqTestResult, format_time};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IqResultVm {
    pub score: u8,
    pub band: &'static str,
    pub correct_label: String,
    pub time_taken: String,
}

impl IqResultVm {
    #[must_use]
    pub fn new(result: IqTestResult, time_left_secs: u32) -> Self {
        Self {
            score: result.score.value(),
            band: result.score.band(),
            correct_label: format!("{}/{}", result.correct, result.total),
            time_taken: format_time(IQ_TEST_DURATION_SECS.saturating_sub(time_left_secs)),
        }
    }
}

/// "Question 3 of 8"
#[must_use]
pub fn question_counter(index: usize, total: usize) -> String {
    format!("Question {} of {total}", index + 1)
}

/// Whole-percent progress through a question list.
#[must_use]
pub fn progress_percent(done: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    done.min(total) * 100 / total
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSummaryVm {
    pub score_label: String,
    pub percent: u32,
    pub message: &'static str,
}

impl QuizSummaryVm {
    #[must_use]
    pub fn new(score: u32, total: u32, percent: u32) -> Self {
        let message = match percent {
            80.. => "Excellent work!",
            60..80 => "Good job, keep practicing.",
            _ => "Keep studying and try again.",
        };
        Self {
            score_label: format!("You scored {score} out of {total} questions correctly!"),
            percent,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::scoring::IqScore;

    #[test]
    fn result_shows_band_and_elapsed_time() {
        let result = IqTestResult {
            correct: 6,
            total: 8,
            score: IqScore::from_answers(6, 8),
        };
        let vm = IqResultVm::new(result, 480);
        assert_eq!(vm.score, 110);
        assert_eq!(vm.band, "Above average");
        assert_eq!(vm.correct_label, "6/8");
        assert_eq!(vm.time_taken, "2:00");
    }

    #[test]
    fn counters_and_progress() {
        assert_eq!(question_counter(0, 8), "Question 1 of 8");
        assert_eq!(progress_percent(2, 8), 25);
        assert_eq!(progress_percent(3, 0), 0);
    }

    #[test]
    fn quiz_summary_message_tracks_percent() {
        assert_eq!(QuizSummaryVm::new(9, 10, 90).message, "Excellent work!");
        assert_eq!(QuizSummaryVm::new(6, 10, 60).message, "Good job, keep practicing.");
        assert_eq!(QuizSummaryVm::new(1, 10, 10).message, "Keep studying and try again.");
    }
}
