//! Render settings shared by the CLI and the renderer.

use crate::stats::PASS_THRESHOLD;
use clap::ValueEnum;

pub const DEFAULT_TITLE: &str = "Quiz Results";
pub const DEFAULT_DPI: u32 = 200;

/// Figure size in inches (width, height)
pub const FIGURE_INCHES: (f64, f64) = (12.0, 5.0);

/// How the process exit code reflects the render outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExitCodeMode {
    /// Exit 0 for both success and failure; the status line carries the result
    #[default]
    AlwaysZero,
    /// Exit 1 when rendering failed
    Mirror,
}

impl ExitCodeMode {
    pub fn code(self, success: bool) -> i32 {
        match self {
            ExitCodeMode::AlwaysZero => 0,
            ExitCodeMode::Mirror if success => 0,
            ExitCodeMode::Mirror => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub title: String,
    pub pass_threshold: u32,
    pub dpi: u32,
    pub open_after: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            pass_threshold: PASS_THRESHOLD,
            dpi: DEFAULT_DPI,
            open_after: false,
        }
    }
}

impl RenderSettings {
    /// Pixel dimensions of the output image.
    pub fn image_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (FIGURE_INCHES.0 * dpi).round() as u32,
            (FIGURE_INCHES.1 * dpi).round() as u32,
        )
    }

    /// Convert a font size in points to pixels at the configured DPI.
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_figure_is_12_by_5_at_200_dpi() {
        assert_eq!(RenderSettings::default().image_size(), (2400, 1000));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ExitCodeMode::AlwaysZero.code(false), 0);
        assert_eq!(ExitCodeMode::AlwaysZero.code(true), 0);
        assert_eq!(ExitCodeMode::Mirror.code(true), 0);
        assert_eq!(ExitCodeMode::Mirror.code(false), 1);
    }
}
