//! Stats module - Score calculations

mod calculator;

pub use calculator::{ScoreCalculator, ScoreSummary, PASS_THRESHOLD};
