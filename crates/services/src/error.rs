//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ConfigError, LabelError, LoadError, SummaryError};

use crate::quiz::{QuizAction, QuizPhase};

/// Errors emitted by the quiz session and engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Label(#[from] LabelError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: QuizAction, phase: QuizPhase },
}

impl QuizError {
    pub(crate) fn invalid(action: QuizAction, phase: QuizPhase) -> Self {
        Self::InvalidTransition { action, phase }
    }
}
