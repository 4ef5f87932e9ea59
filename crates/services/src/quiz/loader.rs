use std::sync::Arc;

use tracing::{debug, error, info, warn};

use quiz_core::draw::IndexPicker;
use quiz_core::model::{LoadError, QuestionBank, QuizSettings};
use storage::QuestionSource;

use super::engine::QuizEngine;
use crate::error::QuizError;

/// Fetch and parse a question bank. The fetch is attempted once.
///
/// # Errors
///
/// Returns `LoadError::SourceUnavailable` if the source fails and
/// `LoadError::Empty` if no complete question is found.
pub async fn load_bank(source: &dyn QuestionSource) -> Result<QuestionBank, LoadError> {
    let location = source.describe();
    let raw = source.fetch().await.map_err(|err| {
        error!(source = %location, error = %err, "failed to read questions");
        LoadError::from(err)
    })?;

    let (entries, stats) = QuestionBank::parse_entries(&raw);
    debug!(
        source = %location,
        content_len = stats.content_len,
        lines = stats.non_blank_lines,
        "question text read"
    );
    if stats.dropped_lines > 0 {
        warn!(
            source = %location,
            dropped = stats.dropped_lines,
            "trailing lines do not form a complete question"
        );
    }
    if stats.missing_answers > 0 {
        warn!(
            source = %location,
            count = stats.missing_answers,
            "questions without a readable answer will always score as wrong"
        );
    }

    let bank = QuestionBank::new(entries).inspect_err(|_| {
        error!(source = %location, "no questions loaded; check the file path and format");
    })?;
    info!(source = %location, questions = bank.len(), "question bank loaded");
    Ok(bank)
}

/// Load a bank and build an idle engine around it.
///
/// # Errors
///
/// Returns `QuizError::Load` for source/parse failures and `QuizError::Config`
/// if the bank is smaller than the session size.
pub async fn load_engine<P: IndexPicker>(
    source: &dyn QuestionSource,
    settings: QuizSettings,
    picker: P,
) -> Result<QuizEngine<P>, QuizError> {
    let bank = load_bank(source).await?;
    QuizEngine::new(Arc::new(bank), settings, picker)
}
