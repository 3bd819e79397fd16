//! Score Calculator Module
//! Derives percentage and pass/fail status from a quiz result.

use crate::data::QuizResult;

/// Default pass threshold, in percent
pub const PASS_THRESHOLD: u32 = 70;

/// Derived figures for one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub percentage: u32,
    pub passed: bool,
}

impl ScoreSummary {
    /// "PASSED ✓" or "FAILED ✗"
    pub fn status_label(&self) -> &'static str {
        if self.passed {
            "PASSED ✓"
        } else {
            "FAILED ✗"
        }
    }
}

pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Percentage rounded to the nearest integer, halves rounding up.
    pub fn percentage(result: &QuizResult) -> u32 {
        if result.total_count == 0 {
            return 0;
        }
        let ratio = result.correct_count as f64 / result.total_count as f64;
        (ratio * 100.0).round() as u32
    }

    pub fn summarize(result: &QuizResult, pass_threshold: u32) -> ScoreSummary {
        let percentage = Self::percentage(result);
        ScoreSummary {
            correct: result.correct_count,
            incorrect: result.incorrect_count(),
            total: result.total_count,
            percentage,
            passed: percentage >= pass_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(correct: u32, total: u32) -> ScoreSummary {
        ScoreCalculator::summarize(&QuizResult::new(correct, total).unwrap(), PASS_THRESHOLD)
    }

    #[test]
    fn seventy_percent_passes() {
        let s = summary(7, 10);
        assert_eq!(s.percentage, 70);
        assert!(s.passed);
        assert_eq!(s.status_label(), "PASSED ✓");
    }

    #[test]
    fn sixty_percent_fails() {
        let s = summary(6, 10);
        assert_eq!(s.percentage, 60);
        assert!(!s.passed);
        assert_eq!(s.status_label(), "FAILED ✗");
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(summary(1, 3).percentage, 33);
        assert_eq!(summary(2, 3).percentage, 67);
        assert_eq!(summary(1, 8).percentage, 13);
    }

    #[test]
    fn pass_label_tracks_threshold_for_every_count() {
        for total in 1..=20 {
            for correct in 0..=total {
                let s = summary(correct, total);
                let expected = ((correct as f64 / total as f64) * 100.0).round() as u32;
                assert_eq!(s.percentage, expected);
                assert_eq!(s.passed, expected >= 70);
                assert_eq!(s.correct + s.incorrect, total);
            }
        }
    }

    #[test]
    fn custom_threshold_is_respected() {
        let r = QuizResult::new(5, 10).unwrap();
        assert!(ScoreCalculator::summarize(&r, 50).passed);
        assert!(!ScoreCalculator::summarize(&r, 51).passed);
    }
}
