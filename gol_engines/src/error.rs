//! Error types for gol_engines.

use thiserror::Error;

/// Errors surfaced by grid construction, seed parsing and generation updates.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Dimensions, cell values or counts that can never describe a valid run.
    #[error("validation error: {0}")]
    Validation(String),

    /// The seed source could not be read.
    #[error("failed to read seed: {0}")]
    Io(#[from] std::io::Error),

    /// The seed was readable but its content is truncated or malformed.
    #[error("malformed seed at line {line}: {reason}")]
    MalformedSeed {
        /// One-based line number in the seed text.
        line: usize,
        /// What was wrong with that line.
        reason: String,
    },

    /// A worker died while computing a generation.
    #[error("worker failed during advance: {0}")]
    WorkerFailed(String),

    /// The advance deadline expired before every row was evaluated.
    #[error("advance cancelled: deadline expired")]
    Cancelled,

    /// A previous advance failed, the grid state is undefined.
    #[error("engine is poisoned by a failed advance")]
    EnginePoisoned,
}

impl LifeError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSeed {
            line,
            reason: reason.into(),
        }
    }

    /// Whether the error belongs to the concurrency failure class
    /// (the engine that produced it must be discarded).
    pub fn is_concurrency_failure(&self) -> bool {
        matches!(self, Self::WorkerFailed(_) | Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
