//! Compliance summary over a set of violations

use crate::{GuidelineViolation, Severity};
use serde::{Deserialize, Serialize};

/// Points deducted per violation of each severity
const CRITICAL_PENALTY: u32 = 10;
const IMPORTANT_PENALTY: u32 = 5;
const RECOMMENDED_PENALTY: u32 = 2;

/// More important violations than this triggers a style review recommendation
const IMPORTANT_REVIEW_LIMIT: usize = 5;

/// Violation counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeveritySummary {
    pub critical: usize,
    pub important: usize,
    pub recommended: usize,
}

impl SeveritySummary {
    pub fn from_violations(violations: &[GuidelineViolation]) -> Self {
        let mut summary = Self::default();
        for violation in violations {
            match violation.guideline.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Important => summary.important += 1,
                Severity::Recommended => summary.recommended += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.critical + self.important + self.recommended
    }
}

/// Guideline compliance for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// 100 minus severity-weighted penalties, floored at 0
    pub score: u8,
    pub summary: SeveritySummary,
    pub recommendations: Vec<String>,
}

impl ComplianceReport {
    /// Build a report from the violations found in `content`
    pub fn build(content: &str, violations: &[GuidelineViolation]) -> Self {
        let summary = SeveritySummary::from_violations(violations);
        let penalty = summary.critical as u32 * CRITICAL_PENALTY
            + summary.important as u32 * IMPORTANT_PENALTY
            + summary.recommended as u32 * RECOMMENDED_PENALTY;
        let score = 100u32.saturating_sub(penalty) as u8;

        let mut recommendations = Vec::new();
        if summary.critical > 0 {
            recommendations.push("Address critical policy violations immediately".to_string());
        }
        if summary.important > IMPORTANT_REVIEW_LIMIT {
            recommendations.push("Review and fix important style issues".to_string());
        }
        if !content.contains("<ref") {
            recommendations.push("Add citations to verify your claims".to_string());
        }
        if !content.contains("==") {
            recommendations.push("Organize content with section headings".to_string());
        }

        Self {
            score,
            summary,
            recommendations,
        }
    }
}

impl Default for ComplianceReport {
    fn default() -> Self {
        Self::build("", &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidelines::GuidelineDetector;

    #[test]
    fn test_clean_structured_content() {
        let content = "Lead.<ref>x</ref>\n== History ==\nMore.";
        let report = ComplianceReport::build(content, &[]);
        assert_eq!(report.score, 100);
        assert_eq!(report.summary.total(), 0);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_penalties_by_severity() {
        let content = "This legendary company is clearly the best in Africa.";
        let violations = GuidelineDetector::builtin().detect(content);
        let report = ComplianceReport::build(content, &violations);
        // one critical (npov), two important (peacock)
        assert_eq!(report.summary.critical, 1);
        assert_eq!(report.summary.important, 2);
        assert_eq!(report.score, 100 - 10 - 10);
        assert_eq!(
            report.recommendations,
            vec![
                "Address critical policy violations immediately",
                "Add citations to verify your claims",
                "Organize content with section headings",
            ]
        );
    }

    #[test]
    fn test_score_floors_at_zero() {
        let line = "Obviously clearly of course naturally undoubtedly without a doubt.\n";
        let content = line.repeat(5);
        let violations = GuidelineDetector::builtin().detect(&content);
        assert_eq!(violations.len(), 30);
        assert_eq!(ComplianceReport::build(&content, &violations).score, 0);
    }

    #[test]
    fn test_many_important_violations_request_review() {
        let content = "best\ngreatest\niconic\nlegendary\nrenowned\nacclaimed\n== A ==<ref>";
        let violations = GuidelineDetector::builtin().detect(content);
        let report = ComplianceReport::build(content, &violations);
        assert_eq!(report.summary.important, 6);
        assert_eq!(
            report.recommendations,
            vec!["Review and fix important style issues"]
        );
    }
}
