//! Quiz Report - Quiz Result Chart Generator
//!
//! Renders a pie + bar chart summarizing one quiz attempt to a PNG file and
//! prints a single JSON status line on stdout. All progress output goes to
//! stderr.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use config::{ExitCodeMode, RenderSettings, DEFAULT_DPI, DEFAULT_TITLE};
use data::{LoadedRequest, RequestLoader, RequestSources};
use report::{RenderOutcome, ReportRenderer};
use stats::PASS_THRESHOLD;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "quiz-report",
    version,
    about = "Render a quiz result chart and report the outcome as JSON"
)]
struct Cli {
    /// JSON render request file ("-" reads stdin)
    #[arg(long)]
    request: Option<PathBuf>,

    /// Number of correct answers
    #[arg(long)]
    correct: Option<u32>,

    /// Number of questions in the quiz
    #[arg(long)]
    total: Option<u32>,

    /// JSON array of question records
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Heading above the pie chart [default: "Quiz Results"]
    #[arg(long)]
    title: Option<String>,

    /// Minimum percentage counted as a pass
    #[arg(long, default_value_t = PASS_THRESHOLD, value_parser = clap::value_parser!(u32).range(0..=100))]
    pass_threshold: u32,

    /// Image resolution in pixels per inch (figure is 12x5 inches)
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..=1200))]
    dpi: u32,

    /// Whether the exit code reflects the render outcome
    #[arg(long, value_enum, default_value_t = ExitCodeMode::AlwaysZero)]
    exit_code: ExitCodeMode,

    /// Open the chart with the system viewer after a successful render
    #[arg(long)]
    open: bool,
}

impl Cli {
    fn sources(&self) -> RequestSources {
        RequestSources {
            request: self.request.clone(),
            correct: self.correct,
            total: self.total,
            questions: self.questions.clone(),
            output: self.output.clone(),
        }
    }

    fn settings(&self, file_title: Option<String>) -> RenderSettings {
        RenderSettings {
            title: self
                .title
                .clone()
                .or(file_title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            pass_threshold: self.pass_threshold,
            dpi: self.dpi,
            open_after: self.open,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiz_report=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            let message = e.to_string();
            let first = message.lines().next().unwrap_or("invalid arguments");
            emit(&RenderOutcome::failure(first.trim_start_matches("error: ")));
            process::exit(2);
        }
    };

    let outcome = run(&cli);
    emit(&outcome);
    process::exit(cli.exit_code.code(outcome.is_success()));
}

fn load_request(sources: &RequestSources) -> anyhow::Result<LoadedRequest> {
    RequestLoader::load(sources).context("Failed to load render request")
}

fn run(cli: &Cli) -> RenderOutcome {
    let loaded = match load_request(&cli.sources()) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{e:#}");
            return RenderOutcome::failure(format!("{e:#}"));
        }
    };

    let settings = cli.settings(loaded.title);
    let open_after = settings.open_after;
    let outcome = ReportRenderer::new(settings).render(&loaded.request);

    if open_after && outcome.is_success() {
        if let Err(e) = open::that(&loaded.request.output_path) {
            warn!(error = %e, "could not open chart viewer");
        }
    }
    outcome
}

/// Print the one status line the calling process parses.
fn emit(outcome: &RenderOutcome) {
    let line = outcome.to_status_line().unwrap_or_else(|e| {
        error!(error = %e, "failed to encode status line");
        r#"{"success": false, "error": "failed to encode status line"}"#.to_string()
    });
    println!("{line}");
}
