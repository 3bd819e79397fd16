//! Question Processor Module
//! Expands the supplied question records onto the full 1..=total numbering.

use crate::data::QuestionRecord;
use std::collections::HashMap;
use tracing::warn;

/// Correctness of one question slot on the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSlot {
    pub number: u32,
    pub is_correct: bool,
}

/// Maps sparse question records onto a dense per-question sequence.
pub struct QuestionProcessor;

impl QuestionProcessor {
    /// One slot per question number `1..=total`.
    ///
    /// Numbers without a record count as not answered (incorrect). Records
    /// numbered outside the range are dropped.
    pub fn fill_slots(questions: &[QuestionRecord], total: u32) -> Vec<QuestionSlot> {
        let mut by_number: HashMap<u32, bool> = HashMap::with_capacity(questions.len());
        for q in questions {
            if q.question_number == 0 || q.question_number > total {
                warn!(
                    question = q.question_number,
                    total,
                    "question number out of range, ignoring"
                );
                continue;
            }
            by_number.insert(q.question_number, q.is_correct);
        }

        (1..=total)
            .map(|number| QuestionSlot {
                number,
                is_correct: by_number.get(&number).copied().unwrap_or(false),
            })
            .collect()
    }
}
