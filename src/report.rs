//! Report Generator Module
//! Renders a quiz result chart to disk and reports the outcome as one JSON line.
//!
//! Every failure along the way (directory creation, plotting, saving, or the
//! post-save check) is folded into `RenderOutcome::Failure`, so callers always
//! get a status to print.

use crate::charts::{BarPanel, ChartPlotter, StaticChartRenderer};
use crate::config::RenderSettings;
use crate::data::{RenderRequest, ValidationError};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Output path {0} has no file name")]
    NoFileName(String),
    #[error("Output file {0} must have a .png extension")]
    NotPng(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Plotting failed: {0}")]
    Plot(String),
    #[error("Failed to save chart: {0}")]
    Save(String),
    #[error("Plot file was not created: {0}")]
    NotCreated(String),
    #[error("Plot file is empty: {0}")]
    EmptyFile(String),
    #[error("Plot file is not a readable image: {0}")]
    Unreadable(String),
}

impl RenderError {
    pub fn plot<E: Display>(err: E) -> Self {
        RenderError::Plot(err.to_string())
    }
}

/// Result of one render, as reported to the calling process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Success { filename: String },
    Failure { error: String },
}

#[derive(Serialize)]
struct StatusLine<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Writes `", "` between members and `": "` after keys.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

impl RenderOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        RenderOutcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success { .. })
    }

    /// `{"success": true, "filename": "..."}` or `{"success": false, "error": "..."}`
    pub fn to_status_line(&self) -> serde_json::Result<String> {
        let status = match self {
            RenderOutcome::Success { filename } => StatusLine {
                success: true,
                filename: Some(filename.as_str()),
                error: None,
            },
            RenderOutcome::Failure { error } => StatusLine {
                success: false,
                filename: None,
                error: Some(error.as_str()),
            },
        };

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        status.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Validates a request, draws the chart, saves it, and checks the saved file.
pub struct ReportRenderer {
    settings: RenderSettings,
}

impl ReportRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn render(&self, request: &RenderRequest) -> RenderOutcome {
        match self.try_render(request) {
            Ok(filename) => RenderOutcome::Success { filename },
            Err(e) => {
                error!(error = %e, "chart generation failed");
                RenderOutcome::failure(e.to_string())
            }
        }
    }

    fn try_render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        request.validate()?;
        let path = request.output_path.as_path();
        let filename = Self::file_name(path)?;

        let data = ChartPlotter::build(request, &self.settings);
        info!(
            "quiz graph: {}/{} = {}%",
            data.summary.correct, data.summary.total, data.summary.percentage
        );

        Self::prepare_directory(path)?;

        match &data.bar_panel {
            BarPanel::Bars(_) => info!("bar chart created with {} bars", data.bar_count()),
            BarPanel::NoData => info!("no question data, showing fallback message"),
        }

        info!(path = %path.display(), "saving chart");
        StaticChartRenderer::render_to_file(&data, &self.settings, path)?;

        let bytes = self.verify(path)?;
        info!(bytes, "chart saved: {filename}");
        Ok(filename)
    }

    fn file_name(path: &Path) -> Result<String, RenderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RenderError::NoFileName(path.display().to_string()))?;

        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(RenderError::NotPng(name));
        }
        Ok(name)
    }

    /// Create the parent directory (mode 0755 on unix) if it is missing.
    fn prepare_directory(path: &Path) -> Result<(), RenderError> {
        let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(dir)
            .map_err(|source| RenderError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;

        info!(dir = %dir.display(), "plot directory ready");
        Ok(())
    }

    /// The file must exist, be non-empty, and decode at the configured size.
    fn verify(&self, path: &Path) -> Result<u64, RenderError> {
        let display = || path.display().to_string();

        let meta = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            _ => return Err(RenderError::NotCreated(display())),
        };
        if meta.len() == 0 {
            return Err(RenderError::EmptyFile(display()));
        }

        let dims = image::image_dimensions(path)
            .map_err(|e| RenderError::Unreadable(format!("{}: {e}", display())))?;
        let expected = self.settings.image_size();
        if dims != expected {
            return Err(RenderError::Unreadable(format!(
                "{}: expected {}x{}, found {}x{}",
                display(),
                expected.0,
                expected.1,
                dims.0,
                dims.1
            )));
        }

        Ok(meta.len())
    }
}
