//! Chart Layout Module
//! Turns a render request into the geometry and labels of both panels.
//!
//! Nothing here touches a drawing backend, so every layout rule can be
//! checked without producing an image.

use crate::config::RenderSettings;
use crate::data::{QuestionProcessor, RenderRequest};
use crate::stats::{ScoreCalculator, ScoreSummary};
use plotters::style::RGBColor;

/// #4CAF50
pub const CORRECT_COLOR: RGBColor = RGBColor(76, 175, 80);
/// #f44336
pub const INCORRECT_COLOR: RGBColor = RGBColor(244, 67, 54);

/// Pie starts at 12 o'clock and runs counter-clockwise
pub const PIE_START_ANGLE: f64 = 90.0;
/// Offset of the exploded slice, as a fraction of the radius
pub const EXPLODE_OFFSET: f64 = 0.1;

pub const BAR_PANEL_TITLE: &str = "Question-wise Performance";
pub const NO_DATA_LINES: [&str; 2] = ["No Question Data", "Available"];

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: u32,
    pub color: RGBColor,
    /// Radial offset as a fraction of the radius
    pub explode: f64,
    /// Degrees, counter-clockwise from 3 o'clock
    pub start_angle: f64,
    pub sweep: f64,
    pub percent_label: String,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Check,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub number: u32,
    pub height: f64,
    pub color: RGBColor,
    pub mark: Mark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BarPanel {
    Bars(Vec<Bar>),
    /// No question records were supplied
    NoData,
}

/// Everything the renderer needs for one report image
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub summary: ScoreSummary,
    pub title: String,
    pub status_line: String,
    pub status_color: RGBColor,
    pub slices: Vec<PieSlice>,
    pub bar_panel: BarPanel,
}

impl ChartData {
    pub fn bar_count(&self) -> usize {
        match &self.bar_panel {
            BarPanel::Bars(bars) => bars.len(),
            BarPanel::NoData => 0,
        }
    }
}

/// Builds chart layouts from quiz data.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn build(request: &RenderRequest, settings: &RenderSettings) -> ChartData {
        let summary = ScoreCalculator::summarize(&request.result, settings.pass_threshold);

        let bar_panel = if request.questions.is_empty() {
            BarPanel::NoData
        } else {
            BarPanel::Bars(Self::bars(request))
        };

        ChartData {
            summary,
            title: settings.title.clone(),
            status_line: format!("{} - {}%", summary.status_label(), summary.percentage),
            status_color: Self::outcome_color(summary.passed),
            slices: Self::pie_slices(&summary),
            bar_panel,
        }
    }

    pub fn outcome_color(ok: bool) -> RGBColor {
        if ok {
            CORRECT_COLOR
        } else {
            INCORRECT_COLOR
        }
    }

    /// Two slices (correct, incorrect) while anything was missed; a single
    /// full "Correct" slice otherwise.
    pub fn pie_slices(summary: &ScoreSummary) -> Vec<PieSlice> {
        let parts: Vec<(&'static str, u32, RGBColor, f64)> = if summary.incorrect > 0 {
            vec![
                ("Correct", summary.correct, CORRECT_COLOR, 0.0),
                ("Incorrect", summary.incorrect, INCORRECT_COLOR, EXPLODE_OFFSET),
            ]
        } else {
            vec![("Correct", summary.correct, CORRECT_COLOR, 0.0)]
        };

        let sum: u32 = parts.iter().map(|p| p.1).sum();
        let mut angle = PIE_START_ANGLE;

        parts
            .into_iter()
            .map(|(label, value, color, explode)| {
                let fraction = if sum == 0 {
                    0.0
                } else {
                    value as f64 / sum as f64
                };
                let slice = PieSlice {
                    label,
                    value,
                    color,
                    explode,
                    start_angle: angle,
                    sweep: fraction * 360.0,
                    percent_label: format!("{:.0}%", fraction * 100.0),
                };
                angle += slice.sweep;
                slice
            })
            .collect()
    }

    /// One unit-height bar per question number `1..=total`.
    pub fn bars(request: &RenderRequest) -> Vec<Bar> {
        QuestionProcessor::fill_slots(&request.questions, request.result.total_count)
            .into_iter()
            .map(|slot| Bar {
                number: slot.number,
                height: 1.0,
                color: Self::outcome_color(slot.is_correct),
                mark: if slot.is_correct {
                    Mark::Check
                } else {
                    Mark::Cross
                },
            })
            .collect()
    }
}
