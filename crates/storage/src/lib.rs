#![forbid(unsafe_code)]

pub mod source;

pub use source::{FileQuestionSource, InMemoryQuestionSource, QuestionSource, SourceError};
