//! Writing guideline catalog, violation detection and compliance reporting

pub mod catalog;
pub mod compliance;
pub mod detector;

pub use catalog::GuidelineCatalog;
pub use compliance::{ComplianceReport, SeveritySummary};
pub use detector::{builtin_rules, DetectionRule, GuidelineDetector, MatchMode, Phrase, RuleKind};
