//! Data module - Quiz request loading and processing

mod loader;
mod model;
mod processor;

pub use loader::{LoadedRequest, RequestLoader, RequestSources};
pub use model::{QuestionRecord, QuizResult, RenderRequest, ValidationError};
pub use processor::QuestionProcessor;
