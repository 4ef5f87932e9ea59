use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::SessionId;
use crate::model::tier::ScoreTier;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("finished_at is before started_at")]
    InvalidTimeRange,

    #[error("total questions ({total}) does not match answer counts ({sum})")]
    CountMismatch { total: usize, sum: usize },
}

/// Aggregate result of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    session_id: SessionId,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    total: usize,
    correct: usize,
    wrong: usize,
    tier: ScoreTier,
}

impl QuizSummary {
    /// Build a summary; the tier is derived from the counts.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `finished_at` precedes `started_at`.
    /// Returns `SummaryError::CountMismatch` if `correct + wrong != total`.
    pub fn new(
        session_id: SessionId,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        correct: usize,
        wrong: usize,
        total: usize,
    ) -> Result<Self, SummaryError> {
        if finished_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let sum = correct + wrong;
        if sum != total {
            return Err(SummaryError::CountMismatch { total, sum });
        }

        Ok(Self {
            session_id,
            started_at,
            finished_at,
            total,
            correct,
            wrong,
            tier: ScoreTier::from_score(correct, wrong, total),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> usize {
        self.wrong
    }

    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        self.tier
    }
}
