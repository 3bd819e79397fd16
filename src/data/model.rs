//! Quiz Data Model
//! Score counts, per-question records and the render request built from them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Largest quiz the bar chart will lay out
pub const MAX_QUESTIONS: u32 = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("totalCount must be greater than 0")]
    ZeroTotal,
    #[error("correctCount ({correct}) exceeds totalCount ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
    #[error("totalCount ({total}) exceeds the limit of {max} questions")]
    TooManyQuestions { total: u32, max: u32 },
    #[error("duplicate question number {0}")]
    DuplicateQuestion(u32),
}

/// Aggregate score for one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub correct_count: u32,
    pub total_count: u32,
}

impl QuizResult {
    pub fn new(correct_count: u32, total_count: u32) -> Result<Self, ValidationError> {
        let result = Self {
            correct_count,
            total_count,
        };
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_count == 0 {
            return Err(ValidationError::ZeroTotal);
        }
        if self.total_count > MAX_QUESTIONS {
            return Err(ValidationError::TooManyQuestions {
                total: self.total_count,
                max: MAX_QUESTIONS,
            });
        }
        if self.correct_count > self.total_count {
            return Err(ValidationError::CorrectExceedsTotal {
                correct: self.correct_count,
                total: self.total_count,
            });
        }
        Ok(())
    }

    pub fn incorrect_count(&self) -> u32 {
        self.total_count.saturating_sub(self.correct_count)
    }
}

/// Per-question detail shown in the performance breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question_number: u32,
    #[serde(alias = "question", default)]
    pub question_text: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Everything needed to draw one report image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub result: QuizResult,
    pub questions: Vec<QuestionRecord>,
    pub output_path: PathBuf,
}

impl RenderRequest {
    /// Check score invariants and question-number uniqueness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.result.validate()?;

        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.question_number) {
                return Err(ValidationError::DuplicateQuestion(q.question_number));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32, ok: bool) -> QuestionRecord {
        QuestionRecord {
            question_number: n,
            question_text: format!("Question {n}"),
            user_answer: "a".to_string(),
            correct_answer: "a".to_string(),
            is_correct: ok,
        }
    }

    #[test]
    fn quiz_result_rejects_zero_total() {
        assert_eq!(QuizResult::new(0, 0), Err(ValidationError::ZeroTotal));
    }

    #[test]
    fn quiz_result_rejects_correct_above_total() {
        assert_eq!(
            QuizResult::new(11, 10),
            Err(ValidationError::CorrectExceedsTotal {
                correct: 11,
                total: 10
            })
        );
    }

    #[test]
    fn quiz_result_rejects_oversized_total() {
        assert_eq!(
            QuizResult::new(0, 4_000_000_000),
            Err(ValidationError::TooManyQuestions {
                total: 4_000_000_000,
                max: MAX_QUESTIONS
            })
        );
        assert!(QuizResult::new(0, MAX_QUESTIONS).is_ok());
        assert!(QuizResult::new(0, MAX_QUESTIONS + 1).is_err());
    }

    #[test]
    fn incorrect_count_is_remainder() {
        let r = QuizResult::new(7, 10).unwrap();
        assert_eq!(r.incorrect_count(), 3);
    }

    #[test]
    fn duplicate_question_numbers_are_rejected() {
        let req = RenderRequest {
            result: QuizResult::new(1, 3).unwrap(),
            questions: vec![record(1, true), record(2, false), record(1, false)],
            output_path: PathBuf::from("out.png"),
        };
        assert_eq!(req.validate(), Err(ValidationError::DuplicateQuestion(1)));
    }

    #[test]
    fn question_record_accepts_legacy_question_key() {
        let json = r#"{"questionNumber":2,"question":"Which operator allocates memory?",
            "userAnswer":"Not Answered","correctAnswer":"new","isCorrect":false}"#;
        let q: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_number, 2);
        assert_eq!(q.question_text, "Which operator allocates memory?");
        assert!(!q.is_correct);
    }

    #[test]
    fn question_record_text_fields_are_optional() {
        let q: QuestionRecord =
            serde_json::from_str(r#"{"questionNumber":4,"isCorrect":true}"#).unwrap();
        assert_eq!(q.question_text, "");
        assert!(q.is_correct);
    }
}
