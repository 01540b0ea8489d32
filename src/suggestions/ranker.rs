//! Ordering and filtering of suggestions and violations for presentation

use crate::{EnhancedSuggestion, GuidelineViolation, Severity, SuggestionCategory};

/// Ranks suggestions by category priority and violations by severity.
///
/// Both sorts are stable: ties keep their generation order.
pub struct SuggestionRanker;

impl SuggestionRanker {
    pub fn new() -> Self {
        Self
    }

    /// Critical first, then important, then minor
    pub fn rank(&self, mut suggestions: Vec<EnhancedSuggestion>) -> Vec<EnhancedSuggestion> {
        suggestions.sort_by_key(|s| s.category.priority());
        suggestions
    }

    /// Only suggestions in `category`, order preserved
    pub fn filter<'a>(
        &self,
        suggestions: &'a [EnhancedSuggestion],
        category: SuggestionCategory,
    ) -> Vec<&'a EnhancedSuggestion> {
        suggestions.iter().filter(|s| s.category == category).collect()
    }

    /// Most severe first; within a severity, by line
    pub fn rank_violations(&self, mut violations: Vec<GuidelineViolation>) -> Vec<GuidelineViolation> {
        violations.sort_by_key(|v| (v.guideline.severity, v.location.line));
        violations
    }

    /// Only violations at `severity`, order preserved
    pub fn violations_at<'a>(
        &self,
        violations: &'a [GuidelineViolation],
        severity: Severity,
    ) -> Vec<&'a GuidelineViolation> {
        violations
            .iter()
            .filter(|v| v.guideline.severity == severity)
            .collect()
    }
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        Self::new()
    }
}
