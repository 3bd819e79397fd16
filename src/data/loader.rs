//! Render Request Loader Module
//! Assembles a render request from a JSON request file and command-line values.

use crate::data::{QuestionRecord, QuizResult, RenderRequest, ValidationError};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing {0}: pass it on the command line or in the request file")]
    Missing(&'static str),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// On-disk request shape. Every field may be supplied or overridden by flags.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFile {
    result: Option<QuizResult>,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
    output_path: Option<PathBuf>,
    title: Option<String>,
}

/// Raw input sources, as collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct RequestSources {
    /// JSON request file, `-` for stdin
    pub request: Option<PathBuf>,
    pub correct: Option<u32>,
    pub total: Option<u32>,
    /// JSON array of question records
    pub questions: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// A validated request plus the heading the request file asked for, if any.
#[derive(Debug, Clone)]
pub struct LoadedRequest {
    pub request: RenderRequest,
    pub title: Option<String>,
}

/// Builds render requests from files, stdin, and flags.
pub struct RequestLoader;

impl RequestLoader {
    /// Merge the request file (if any) with flag values; flags win.
    pub fn load(sources: &RequestSources) -> Result<LoadedRequest, LoaderError> {
        let file = match &sources.request {
            Some(path) => Self::read_request_file(path)?,
            None => RequestFile::default(),
        };

        let (correct, total) = match (sources.correct, sources.total, file.result) {
            (Some(correct), Some(total), _) => (correct, total),
            (Some(correct), None, Some(r)) => (correct, r.total_count),
            (None, Some(total), Some(r)) => (r.correct_count, total),
            (None, None, Some(r)) => (r.correct_count, r.total_count),
            (_, None, None) => return Err(LoaderError::Missing("total count")),
            (None, Some(_), None) => return Err(LoaderError::Missing("correct count")),
        };
        let result = QuizResult::new(correct, total)?;

        let questions = match &sources.questions {
            Some(path) => Self::read_questions(path)?,
            None => file.questions,
        };

        let output_path = sources
            .output
            .clone()
            .or(file.output_path)
            .ok_or(LoaderError::Missing("output path"))?;

        let request = RenderRequest {
            result,
            questions,
            output_path,
        };
        request.validate()?;

        debug!(
            correct = request.result.correct_count,
            total = request.result.total_count,
            questions = request.questions.len(),
            "request assembled"
        );

        Ok(LoadedRequest {
            request,
            title: file.title,
        })
    }

    fn read_request_file(path: &Path) -> Result<RequestFile, LoaderError> {
        let text = Self::read_source(path)?;
        serde_json::from_str(&text).map_err(|source| LoaderError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    fn read_questions(path: &Path) -> Result<Vec<QuestionRecord>, LoaderError> {
        let text = Self::read_source(path)?;
        serde_json::from_str(&text).map_err(|source| LoaderError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read a file, or stdin when the path is `-`.
    fn read_source(path: &Path) -> Result<String, LoaderError> {
        let io_err = |source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        };

        if path == Path::new("-") {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(io_err)?;
            Ok(text)
        } else {
            fs::read_to_string(path).map_err(io_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn flags_alone_build_a_request() {
        let sources = RequestSources {
            correct: Some(7),
            total: Some(10),
            output: Some(PathBuf::from("out/report.png")),
            ..Default::default()
        };
        let loaded = RequestLoader::load(&sources).unwrap();
        assert_eq!(loaded.request.result, QuizResult::new(7, 10).unwrap());
        assert!(loaded.request.questions.is_empty());
        assert_eq!(loaded.request.output_path, PathBuf::from("out/report.png"));
        assert!(loaded.title.is_none());
    }

    #[test]
    fn request_file_supplies_everything() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "req.json",
            r#"{"result":{"correctCount":3,"totalCount":4},
                "questions":[{"questionNumber":1,"questionText":"q","userAnswer":"a",
                              "correctAnswer":"a","isCorrect":true}],
                "outputPath":"results/a.png","title":"C++ Level 2"}"#,
        );
        let loaded = RequestLoader::load(&RequestSources {
            request: Some(path),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(loaded.request.result.correct_count, 3);
        assert_eq!(loaded.request.questions.len(), 1);
        assert_eq!(loaded.title.as_deref(), Some("C++ Level 2"));
    }

    #[test]
    fn flags_override_request_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "req.json",
            r#"{"result":{"correctCount":3,"totalCount":4},"outputPath":"a.png"}"#,
        );
        let loaded = RequestLoader::load(&RequestSources {
            request: Some(path),
            correct: Some(1),
            output: Some(PathBuf::from("b.png")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(loaded.request.result, QuizResult::new(1, 4).unwrap());
        assert_eq!(loaded.request.output_path, PathBuf::from("b.png"));
    }

    #[test]
    fn questions_file_is_read_as_array() {
        let dir = TempDir::new().unwrap();
        let questions = write(
            &dir,
            "q.json",
            r#"[{"questionNumber":1,"isCorrect":true},{"questionNumber":2,"isCorrect":false}]"#,
        );
        let loaded = RequestLoader::load(&RequestSources {
            correct: Some(1),
            total: Some(2),
            questions: Some(questions),
            output: Some(PathBuf::from("x.png")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(loaded.request.questions.len(), 2);
    }

    #[test]
    fn missing_output_path_is_reported() {
        let err = RequestLoader::load(&RequestSources {
            correct: Some(1),
            total: Some(2),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("output path"));
    }

    #[test]
    fn missing_counts_are_reported() {
        let err = RequestLoader::load(&RequestSources {
            total: Some(2),
            output: Some(PathBuf::from("x.png")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, LoaderError::Missing("correct count")));
    }

    #[test]
    fn invalid_counts_fail_validation() {
        let err = RequestLoader::load(&RequestSources {
            correct: Some(5),
            total: Some(4),
            output: Some(PathBuf::from("x.png")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Invalid(ValidationError::CorrectExceedsTotal { .. })
        ));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", "{not json");
        let err = RequestLoader::load(&RequestSources {
            request: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, LoaderError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}
