use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::bank::QuestionBank;

/// Questions per session unless configured otherwise.
pub const DEFAULT_SESSION_SIZE: usize = 5;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("session size must be > 0")]
    InvalidSessionSize,

    #[error("question bank has {available} questions but a session needs {required}")]
    InsufficientBank { available: usize, required: usize },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Quiz configuration.
///
/// Deserialization goes through the same check as `QuizSettings::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuizSettings")]
pub struct QuizSettings {
    session_size: usize,
}

#[derive(Deserialize)]
struct RawQuizSettings {
    session_size: usize,
}

impl TryFrom<RawQuizSettings> for QuizSettings {
    type Error = ConfigError;

    fn try_from(raw: RawQuizSettings) -> Result<Self, Self::Error> {
        Self::new(raw.session_size)
    }
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSessionSize` if `session_size` is zero.
    pub fn new(session_size: usize) -> Result<Self, ConfigError> {
        if session_size == 0 {
            return Err(ConfigError::InvalidSessionSize);
        }
        Ok(Self { session_size })
    }

    #[must_use]
    pub fn session_size(&self) -> usize {
        self.session_size
    }

    /// Check that `bank` can fill a full session without repeats.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsufficientBank` if the bank is smaller than the session size.
    pub fn validate_bank(&self, bank: &QuestionBank) -> Result<(), ConfigError> {
        if bank.len() < self.session_size {
            return Err(ConfigError::InsufficientBank {
                available: bank.len(),
                required: self.session_size,
            });
        }
        Ok(())
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            session_size: DEFAULT_SESSION_SIZE,
        }
    }
}
