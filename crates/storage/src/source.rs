use async_trait::async_trait;
use quiz_core::model::LoadError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed with status {0}")]
    HttpStatus(u16),

    #[error("request error: {0}")]
    Http(String),
}

impl From<SourceError> for LoadError {
    fn from(err: SourceError) -> Self {
        LoadError::SourceUnavailable(err.to_string())
    }
}

/// Supplies the raw text of a question bank.
///
/// Fetching is a one-shot operation: callers await it once before any session starts.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the full bank text.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the text cannot be read.
    async fn fetch(&self) -> Result<String, SourceError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Reads the bank from a local file.
#[derive(Debug, Clone)]
pub struct FileQuestionSource {
    path: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(self.path.display().to_string()))
            }
            Err(err) => Err(SourceError::Io(err)),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Simple in-memory source for testing and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    text: Option<String>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A source whose fetch always fails with `SourceError::NotFound`.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        self.text
            .clone()
            .ok_or_else(|| SourceError::NotFound("memory".into()))
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
