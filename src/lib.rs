//! Wikigrade: Editorial Quality Analyzer for Wikipedia-style articles
//!
//! This library scores article text and wikitext along four axes (readability,
//! citations, references, structure), combines them into an overall score and
//! reports guideline violations with actionable suggestions.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod guidelines;
pub mod parser;
pub mod reporter;
pub mod suggestions;

pub use error::WikigradeError;

use guidelines::compliance::ComplianceReport;
use serde::{Deserialize, Serialize};

/// An article to analyze. Produced by a content source (or
/// [`parser::wikitext::parse_article`]) and never mutated by the analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Filled from the file stem when a loaded article leaves it empty
    #[serde(default)]
    pub title: String,
    /// Plain-text summary used for readability and topic detection
    #[serde(default)]
    pub extract: String,
    /// Raw wikitext
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub external_links: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

/// A section of an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Heading level (number of `=` on each side, 1 for the lead)
    #[serde(default = "default_section_level")]
    pub level: u8,
}

fn default_section_level() -> u8 {
    2
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            level,
        }
    }
}

/// Overall quality score with its four sub-scores. Every `score` field is in 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScore {
    pub overall: u8,
    pub readability: ReadabilityScore,
    pub citations: CitationScore,
    pub references: ReferenceScore,
    pub structure: StructureScore,
}

impl QualityScore {
    /// Letter grade for the overall score
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall)
    }
}

/// Readability statistics and indices for the article extract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityScore {
    pub score: u8,
    /// Words per sentence (one decimal)
    pub average_sentence_length: f64,
    /// Characters per word (one decimal)
    pub average_word_length: f64,
    /// Words with three or more estimated syllables
    pub complex_words: usize,
    /// Flesch Reading Ease, 0-100
    pub flesch_score: f64,
    pub gunning_fog_index: f64,
    pub smog_index: f64,
    pub coleman_liau_index: f64,
}

/// Citation counts, density and quality
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationScore {
    pub score: u8,
    pub total_citations: usize,
    pub inline_citations: usize,
    /// Citations per 1000 words of extract (one decimal)
    pub citation_density: f64,
    pub named_references: usize,
    /// Quality markers per citation, as a percentage
    pub citation_quality: u32,
    /// Percentage of sections carrying at least one citation
    pub distribution_score: u32,
}

/// Reference reliability, diversity and recency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceScore {
    pub score: u8,
    pub total_references: usize,
    pub reliable_sources: usize,
    pub external_links: usize,
    /// Reliability contribution, 0-35
    pub source_quality: f64,
    /// Domain diversity contribution, 0-25
    pub source_diversity: u8,
    /// Recency contribution, 0-15
    pub source_recency: u8,
    pub academic_sources: usize,
    pub government_sources: usize,
    pub news_sources: usize,
}

/// Article organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureScore {
    pub score: u8,
    pub has_introduction: bool,
    pub has_sections: bool,
    pub has_references: bool,
    /// Section length evenness, 0-20
    pub section_balance: u8,
    /// 100 when headings nest properly, 50 otherwise, 0 with fewer than two sections
    pub header_hierarchy: u8,
    pub has_infobox: bool,
    pub has_categories: bool,
    pub navigation_score: u8,
    pub section_count: usize,
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Guideline severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Important,
    Recommended,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Important => write!(f, "important"),
            Severity::Recommended => write!(f, "recommended"),
        }
    }
}

/// Kind of guideline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidelineCategory {
    Policy,
    Style,
    Content,
}

impl std::fmt::Display for GuidelineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuidelineCategory::Policy => write!(f, "policy"),
            GuidelineCategory::Style => write!(f, "style"),
            GuidelineCategory::Content => write!(f, "content"),
        }
    }
}

/// A writing guideline from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineDefinition {
    pub id: String,
    pub name: String,
    /// Shortcut such as `WP:NPOV`
    pub short_code: String,
    pub description: String,
    pub category: GuidelineCategory,
    pub severity: Severity,
    pub url: String,
}

/// Where a violation was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column of the match (1-indexed, in characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Full text of the offending line
    pub text: String,
}

impl Location {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            text: text.into(),
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// A guideline violation found in article text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineViolation {
    pub guideline: GuidelineDefinition,
    pub location: Location,
    pub message: String,
    pub suggestion: String,
    /// The exact phrase that triggered the violation (none for heuristics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

/// Suggestion priority bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Critical,
    Important,
    Minor,
}

impl SuggestionCategory {
    /// Sort priority, lower comes first
    pub fn priority(self) -> u8 {
        match self {
            SuggestionCategory::Critical => 1,
            SuggestionCategory::Important => 2,
            SuggestionCategory::Minor => 3,
        }
    }
}

impl std::fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionCategory::Critical => write!(f, "critical"),
            SuggestionCategory::Important => write!(f, "important"),
            SuggestionCategory::Minor => write!(f, "minor"),
        }
    }
}

/// Low / medium / high scale used for impact and effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::Medium => write!(f, "medium"),
            Level::High => write!(f, "high"),
        }
    }
}

/// An improvement suggestion derived from a [`QualityScore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSuggestion {
    pub category: SuggestionCategory,
    pub suggestion: String,
    pub impact: Level,
    pub effort: Level,
}

/// Full analysis of one article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub title: String,
    pub score: QualityScore,
    pub grade: Grade,
    /// Topic profile that selected the weights
    pub topic: analyzer::TopicProfile,
    pub weights: analyzer::ScoringWeights,
    /// Ranked suggestions, critical first
    pub suggestions: Vec<EnhancedSuggestion>,
    /// Guideline violations, most severe first
    pub violations: Vec<GuidelineViolation>,
    pub compliance: ComplianceReport,
}

/// Score an article with default settings.
pub fn score_article(article: &Article) -> QualityScore {
    analyzer::AnalysisEngine::new().score(article)
}

/// Scan text for guideline violations using the built-in catalog and rules.
pub fn detect_guideline_violations(text: &str) -> Vec<GuidelineViolation> {
    guidelines::GuidelineDetector::builtin().detect(text)
}

/// Derive improvement suggestions from a score. Never empty.
pub fn generate_suggestions(score: &QualityScore) -> Vec<EnhancedSuggestion> {
    suggestions::generate_suggestions(score)
}

/// Public API: full analysis (scores, suggestions, violations) with default settings.
pub fn analyze_article(article: &Article) -> AnalysisResult {
    analyzer::AnalysisEngine::new().analyze(article)
}
