//! Per-axis metric analyzers

pub mod citations;
pub mod readability;
pub mod references;
pub mod structure;
pub mod syllables;

pub use citations::{CitationAnalyzer, CitationThresholds};
pub use readability::ReadabilityAnalyzer;
pub use references::ReferenceAnalyzer;
pub use structure::StructureAnalyzer;
pub use syllables::SyllableEstimator;

use crate::Article;

/// Trait for the per-axis analyzers.
///
/// Implementations are pure: the same article always yields the same score,
/// and degenerate input (no text, no links, no sections) yields a zeroed score.
pub trait MetricAnalyzer {
    /// Score record produced by this analyzer
    type Output;

    /// Analyze an article
    fn analyze(&self, article: &Article) -> Self::Output;
}

/// Whitespace-delimited tokens, empty tokens dropped
pub(crate) fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round and clamp a raw score into 0-100
pub(crate) fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
