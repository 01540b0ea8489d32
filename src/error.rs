//! Library error type

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring the analyzers or loading articles.
///
/// Scoring itself never fails: degenerate input produces zeroed scores.
#[derive(Debug, Error)]
pub enum WikigradeError {
    /// A guideline rule references an id that is not in the catalog
    #[error("guideline `{id}` is not in the catalog")]
    UnknownGuideline { id: String },

    /// Custom scoring weights must be non-negative and sum to 1.0
    #[error("scoring weights must be non-negative and sum to 1.0 (got {sum})")]
    InvalidWeights { sum: f64 },

    /// A rule pattern failed to compile
    #[error("invalid pattern for rule `{rule}`: {reason}")]
    InvalidRule { rule: String, reason: String },

    /// An article file could not be decoded
    #[error("failed to parse article {}: {reason}", path.display())]
    ArticleParse { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, WikigradeError>;
