//! Analysis engine - runs the metric analyzers and the guideline detector

use crate::config::{Config, GuidelineSeverity};
use crate::guidelines::{ComplianceReport, GuidelineDetector};
use crate::parser::{load_article, IgnoreDirectives};
use crate::suggestions::{generate_suggestions, SuggestionRanker};
use crate::{AnalysisResult, Article, GuidelineViolation, QualityScore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::metrics::{
    CitationAnalyzer, CitationThresholds, MetricAnalyzer, ReadabilityAnalyzer, ReferenceAnalyzer,
    StructureAnalyzer,
};
use super::scoring::{ScoreAggregator, ScoringWeights, TopicProfile, WeightStrategy};

/// Knobs for an [`AnalysisEngine`]
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    pub strategy: WeightStrategy,
    /// Reference year for source recency; None means the current UTC year
    pub current_year: Option<i32>,
    pub citation_thresholds: CitationThresholds,
    /// Severity overrides keyed by guideline id
    pub guidelines: HashMap<String, GuidelineSeverity>,
}

impl AnalysisSettings {
    /// Settings from a loaded config. Fails on invalid custom weights.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let strategy = match (&config.weights, config.topic.and_then(|t| t.profile())) {
            (Some(weights), _) => {
                weights.validate()?;
                WeightStrategy::Fixed(*weights)
            }
            (None, Some(topic)) => WeightStrategy::Topic(topic),
            (None, None) => WeightStrategy::Auto,
        };
        Ok(Self {
            strategy,
            current_year: config.current_year,
            citation_thresholds: config.citation_thresholds.unwrap_or_default(),
            guidelines: config.guidelines.clone(),
        })
    }
}

/// Main analysis engine that orchestrates the analyzers.
///
/// Holds no per-article state, so one engine can score many articles
/// concurrently.
pub struct AnalysisEngine {
    readability: ReadabilityAnalyzer,
    citations: CitationAnalyzer,
    references: ReferenceAnalyzer,
    structure: StructureAnalyzer,
    aggregator: ScoreAggregator,
    detector: &'static GuidelineDetector,
    ranker: SuggestionRanker,
    guidelines: HashMap<String, GuidelineSeverity>,
}

impl AnalysisEngine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_settings(AnalysisSettings::default())
    }

    pub fn with_settings(settings: AnalysisSettings) -> Self {
        let references = match settings.current_year {
            Some(year) => ReferenceAnalyzer::new(year),
            None => ReferenceAnalyzer::for_current_year(),
        };
        Self {
            readability: ReadabilityAnalyzer::new(),
            citations: CitationAnalyzer::new().with_thresholds(settings.citation_thresholds),
            references,
            structure: StructureAnalyzer::new(),
            aggregator: ScoreAggregator::new(settings.strategy),
            detector: GuidelineDetector::builtin(),
            ranker: SuggestionRanker::new(),
            guidelines: settings.guidelines,
        }
    }

    /// Create an engine from a loaded config
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Ok(Self::with_settings(AnalysisSettings::from_config(config)?))
    }

    /// Pin the reference year used for recency scoring
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.references = ReferenceAnalyzer::new(year);
        self
    }

    /// Score an article
    pub fn score(&self, article: &Article) -> QualityScore {
        self.evaluate(article).2
    }

    fn evaluate(&self, article: &Article) -> (TopicProfile, ScoringWeights, QualityScore) {
        let (topic, weights) = self.aggregator.select(&article.extract);
        debug!(
            title = %article.title,
            %topic,
            year = self.references.current_year(),
            "selected topic profile"
        );

        let score = ScoreAggregator::combine(
            &weights,
            self.readability.analyze(article),
            self.citations.analyze(article),
            self.references.analyze(article),
            self.structure.analyze(article),
        );
        debug!(
            title = %article.title,
            overall = score.overall,
            readability = score.readability.score,
            citations = score.citations.score,
            references = score.references.score,
            structure = score.structure.score,
            "scored article"
        );
        (topic, weights, score)
    }

    /// Full analysis with the engine's guideline overrides
    pub fn analyze(&self, article: &Article) -> AnalysisResult {
        self.analyze_with_overrides(article, &self.guidelines)
    }

    fn analyze_with_overrides(
        &self,
        article: &Article,
        overrides: &HashMap<String, GuidelineSeverity>,
    ) -> AnalysisResult {
        let (topic, weights, score) = self.evaluate(article);

        // wikitext when available, else the plain extract
        let text = if article.content.trim().is_empty() {
            &article.extract
        } else {
            &article.content
        };
        let violations = self.detector.detect(text);
        let violations = IgnoreDirectives::parse(text).filter(violations);
        let violations = apply_guideline_overrides(violations, overrides);
        debug!(title = %article.title, violations = violations.len(), "checked guidelines");

        let compliance = ComplianceReport::build(&article.content, &violations);
        let suggestions = self.ranker.rank(generate_suggestions(&score));
        let violations = self.ranker.rank_violations(violations);

        AnalysisResult {
            title: article.title.clone(),
            grade: score.grade(),
            score,
            topic,
            weights,
            suggestions,
            violations,
            compliance,
        }
    }

    /// Load and analyze one article file, applying per-path config overrides
    pub fn analyze_file(&self, path: &Path, config: Option<&Config>) -> Result<AnalysisResult> {
        let article = load_article(path)?;
        Ok(match config {
            Some(config) => {
                let effective = config.effective_for_file(path);
                self.analyze_with_overrides(&article, &effective.guidelines)
            }
            None => self.analyze(&article),
        })
    }

    /// Analyze multiple files sequentially
    pub fn analyze_many(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<AnalysisResult>> {
        paths.iter().map(|p| self.analyze_file(p, config)).collect()
    }

    /// Analyze multiple files in parallel using rayon. Results keep input order.
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<AnalysisResult>> {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|p| self.analyze_file(p, config))
            .collect()
    }

    /// Analyze in-memory articles in parallel. Results keep input order.
    pub fn analyze_articles(&self, articles: &[Article]) -> Vec<AnalysisResult> {
        use rayon::prelude::*;

        articles.par_iter().map(|a| self.analyze(a)).collect()
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop violations for guidelines turned off and re-grade overridden ones
fn apply_guideline_overrides(
    violations: Vec<GuidelineViolation>,
    overrides: &HashMap<String, GuidelineSeverity>,
) -> Vec<GuidelineViolation> {
    if overrides.is_empty() {
        return violations;
    }
    violations
        .into_iter()
        .filter_map(|mut violation| match overrides.get(&violation.guideline.id) {
            Some(setting) => {
                let severity = setting.to_severity()?;
                violation.guideline.severity = severity;
                Some(violation)
            }
            None => Some(violation),
        })
        .collect()
}

/// Count of articles in one overall-score band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBand {
    pub range: String,
    pub count: usize,
}

/// An article's title and overall score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedArticle {
    pub title: String,
    pub overall: u8,
}

/// Average and median of one axis across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStats {
    pub average: u8,
    pub median: u8,
}

impl AxisStats {
    fn from_values(mut values: Vec<u8>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sum: u32 = values.iter().map(|v| *v as u32).sum();
        let average = (sum as f64 / values.len() as f64).round() as u8;
        values.sort_unstable();
        Self {
            average,
            median: values[values.len() / 2],
        }
    }
}

/// Per-axis statistics across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSummary {
    pub readability: AxisStats,
    pub citations: AxisStats,
    pub references: AxisStats,
    pub structure: AxisStats,
}

/// Upper bounds (inclusive) and labels of the score bands, best first
const BANDS: &[(u8, u8, &str)] = &[
    (90, 100, "90-100"),
    (80, 89, "80-89"),
    (70, 79, "70-79"),
    (60, 69, "60-69"),
    (50, 59, "50-59"),
    (0, 49, "0-49"),
];

/// How many articles to list as top performers and as needing improvement
const RANKED_COUNT: usize = 5;

/// Summary of many analyzed articles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total_articles: usize,
    pub average_score: u8,
    pub score_distribution: Vec<ScoreBand>,
    /// Best first
    pub top_performers: Vec<RankedArticle>,
    /// Worst first
    pub needs_improvement: Vec<RankedArticle>,
    pub metrics: AxisSummary,
}

impl BatchReport {
    /// Build the report. An empty batch yields a zeroed report.
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let overall: Vec<u8> = results.iter().map(|r| r.score.overall).collect();
        let sum: u32 = overall.iter().map(|s| *s as u32).sum();
        let average_score = (sum as f64 / results.len() as f64).round() as u8;

        let score_distribution = BANDS
            .iter()
            .map(|(low, high, label)| ScoreBand {
                range: label.to_string(),
                count: overall.iter().filter(|s| (*low..=*high).contains(*s)).count(),
            })
            .collect();

        let mut ranked: Vec<RankedArticle> = results
            .iter()
            .map(|r| RankedArticle {
                title: r.title.clone(),
                overall: r.score.overall,
            })
            .collect();
        // stable: equal scores keep input order
        ranked.sort_by(|a, b| b.overall.cmp(&a.overall));
        let top_performers = ranked.iter().take(RANKED_COUNT).cloned().collect();
        let needs_improvement = ranked.iter().rev().take(RANKED_COUNT).cloned().collect();

        let axis = |f: fn(&QualityScore) -> u8| {
            AxisStats::from_values(results.iter().map(|r| f(&r.score)).collect())
        };

        Self {
            total_articles: results.len(),
            average_score,
            score_distribution,
            top_performers,
            needs_improvement,
            metrics: AxisSummary {
                readability: axis(|s| s.readability.score),
                citations: axis(|s| s.citations.score),
                references: axis(|s| s.references.score),
                structure: axis(|s| s.structure.score),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopicSetting;
    use crate::{Section, Severity};
    use std::fs;
    use tempfile::TempDir;

    fn article(title: &str, extract: &str, content: &str) -> Article {
        Article {
            title: title.to_string(),
            extract: extract.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    fn result_with(title: &str, overall: u8, axis: u8) -> AnalysisResult {
        let mut result = AnalysisEngine::new().analyze(&Article::default());
        result.title = title.to_string();
        result.score.overall = overall;
        result.score.readability.score = axis;
        result.score.citations.score = axis;
        result.score.references.score = axis;
        result.score.structure.score = axis;
        result
    }

    #[test]
    fn test_empty_article_scores_zero() {
        let score = AnalysisEngine::new().with_current_year(2024).score(&Article::default());
        assert_eq!(score, QualityScore::default());
    }

    #[test]
    fn test_analyze_collects_everything() {
        let a = article(
            "Band",
            "A band.",
            "This legendary company is clearly the best in Africa.",
        );
        let result = AnalysisEngine::new().with_current_year(2024).analyze(&a);
        assert_eq!(result.title, "Band");
        assert_eq!(result.grade, result.score.grade());
        assert_eq!(result.violations.len(), 3);
        // critical first after ranking
        assert_eq!(result.violations[0].guideline.severity, Severity::Critical);
        assert_eq!(result.compliance.summary.critical, 1);
        assert!(!result.suggestions.is_empty());
        assert_eq!(result.topic, TopicProfile::General);
    }

    #[test]
    fn test_suggestions_ranked_by_priority() {
        let result = AnalysisEngine::new().analyze(&Article::default());
        let priorities: Vec<u8> = result.suggestions.iter().map(|s| s.category.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_extract_checked_when_no_wikitext() {
        let a = article("X", "Some people say it is iconic.", "");
        let result = AnalysisEngine::new().analyze(&a);
        assert_eq!(result.violations.len(), 2);
    }

    #[test]
    fn test_guideline_off_and_regrade() {
        let mut guidelines = HashMap::new();
        guidelines.insert("peacock-terms".to_string(), GuidelineSeverity::Off);
        guidelines.insert("npov".to_string(), GuidelineSeverity::Recommended);
        let engine = AnalysisEngine::with_settings(AnalysisSettings {
            guidelines,
            ..Default::default()
        });
        let a = article("X", "", "This legendary company is clearly the best in Africa.");
        let result = engine.analyze(&a);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].guideline.id, "npov");
        assert_eq!(result.violations[0].guideline.severity, Severity::Recommended);
        assert_eq!(result.compliance.score, 98);
    }

    #[test]
    fn test_ignore_directives_respected() {
        let content = "<!-- wikigrade-ignore-next-line -->\nThe best band.\nThe best album.";
        let result = AnalysisEngine::new().analyze(&article("X", "", content));
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.line, 3);
    }

    #[test]
    fn test_settings_from_config() {
        let config: Config = serde_json::from_str(
            r#"{ "topic": "scientific", "currentYear": 2020,
                 "citationThresholds": { "quality": [0.9, 0.8, 0.7], "distribution": [0.9, 0.8, 0.7] } }"#,
        )
        .unwrap();
        let settings = AnalysisSettings::from_config(&config).unwrap();
        assert_eq!(settings.strategy, WeightStrategy::Topic(TopicProfile::Scientific));
        assert_eq!(settings.current_year, Some(2020));
        assert_eq!(settings.citation_thresholds.quality, [0.9, 0.8, 0.7]);

        let engine = AnalysisEngine::with_settings(settings);
        let result = engine.analyze(&article("X", "A red fruit.", ""));
        assert_eq!(result.topic, TopicProfile::Scientific);
        assert_eq!(result.weights, ScoringWeights::for_topic(TopicProfile::Scientific));
    }

    #[test]
    fn test_fixed_weights_from_config() {
        let mut config = Config::default();
        config.weights = Some(ScoringWeights::custom(0.7, 0.1, 0.1, 0.1).unwrap());
        config.topic = Some(TopicSetting::Historical);
        let engine = AnalysisEngine::from_config(&config).unwrap();
        let result = engine.analyze(&Article::default());
        assert_eq!(result.weights.readability, 0.7);

        config.weights = Some(ScoringWeights {
            readability: 1.0,
            citations: 1.0,
            references: 0.0,
            structure: 0.0,
        });
        assert!(AnalysisEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_analyze_file_with_override() {
        let dir = TempDir::new().unwrap();
        let stub_dir = dir.path().join("stubs");
        fs::create_dir(&stub_dir).unwrap();
        let path = stub_dir.join("Band.wiki");
        fs::write(&path, "The best band.").unwrap();

        let config: Config = serde_json::from_str(
            r#"{ "overrides": [ { "files": ["**/stubs/**"], "guidelines": { "peacock-terms": "off" } } ] }"#,
        )
        .unwrap();
        let engine = AnalysisEngine::new();
        let with_config = engine.analyze_file(&path, Some(&config)).unwrap();
        assert!(with_config.violations.is_empty());
        let without = engine.analyze_file(&path, None).unwrap();
        assert_eq!(without.violations.len(), 1);
        assert_eq!(without.title, "Band");
    }

    #[test]
    fn test_analyze_parallel_keeps_order() {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for i in 0..12 {
            let path = dir.path().join(format!("Article_{}.wiki", i));
            fs::write(&path, format!("Article number {}.", i)).unwrap();
            paths.push(path);
        }
        paths.push(dir.path().join("missing.wiki"));

        let engine = AnalysisEngine::new();
        let results = engine.analyze_parallel(&paths, None);
        assert_eq!(results.len(), 13);
        assert_eq!(results[3].as_ref().unwrap().title, "Article 3");
        assert!(results[12].is_err());

        let sequential = engine.analyze_many(&paths[..12], None);
        for (a, b) in results.iter().zip(sequential.iter()) {
            assert_eq!(a.as_ref().unwrap().score, b.as_ref().unwrap().score);
        }
    }

    #[test]
    fn test_analyze_articles_in_parallel() {
        let articles: Vec<Article> = (0..4)
            .map(|i| Article {
                title: format!("A{}", i),
                sections: vec![Section::new("Intro", "x".repeat(150), 1)],
                ..Default::default()
            })
            .collect();
        let results = AnalysisEngine::new().analyze_articles(&articles);
        assert_eq!(results.len(), 4);
        assert_eq!(results[2].title, "A2");
        assert!(results.iter().all(|r| r.score.structure.has_introduction));
    }

    #[test]
    fn test_batch_report_empty() {
        let report = BatchReport::from_results(&[]);
        assert_eq!(report, BatchReport::default());
        assert_eq!(report.total_articles, 0);
        assert!(report.score_distribution.is_empty());
    }

    #[test]
    fn test_batch_report_summary() {
        let results: Vec<AnalysisResult> = [95, 85, 72, 64, 55, 10, 49]
            .iter()
            .enumerate()
            .map(|(i, s)| result_with(&format!("A{}", i), *s, *s))
            .collect();
        let report = BatchReport::from_results(&results);

        assert_eq!(report.total_articles, 7);
        // (95+85+72+64+55+10+49) / 7 = 61.43
        assert_eq!(report.average_score, 61);
        let counts: Vec<usize> = report.score_distribution.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 2]);
        assert_eq!(report.score_distribution[5].range, "0-49");

        let top: Vec<u8> = report.top_performers.iter().map(|a| a.overall).collect();
        assert_eq!(top, vec![95, 85, 72, 64, 55]);
        let bottom: Vec<u8> = report.needs_improvement.iter().map(|a| a.overall).collect();
        assert_eq!(bottom, vec![10, 49, 55, 64, 72]);

        // sorted: 10 49 55 64 72 85 95, median index 3
        assert_eq!(report.metrics.readability.median, 64);
        assert_eq!(report.metrics.structure.average, 61);
    }

    #[test]
    fn test_batch_report_single_article() {
        let report = BatchReport::from_results(&[result_with("Only", 77, 40)]);
        assert_eq!(report.top_performers.len(), 1);
        assert_eq!(report.needs_improvement[0].title, "Only");
        assert_eq!(report.metrics.citations, AxisStats { average: 40, median: 40 });
    }
}
