//! Reference reliability, domain diversity and recency.

use super::{clamp_score, MetricAnalyzer};
use crate::{Article, ReferenceScore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Kinds of reliable source recognized by domain pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Academic,
    Government,
    News,
    Books,
}

struct SourcePatterns {
    kind: SourceKind,
    patterns: Vec<Regex>,
}

fn compile(kind: SourceKind, patterns: &[&str]) -> SourcePatterns {
    SourcePatterns {
        kind,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
            .collect(),
    }
}

static RELIABLE_SOURCES: Lazy<Vec<SourcePatterns>> = Lazy::new(|| {
    vec![
        compile(
            SourceKind::Academic,
            &[
                r"\.edu/",
                r"jstor\.org",
                r"pubmed",
                r"scholar\.google",
                r"academia\.edu",
                r"researchgate",
                r"springer",
                r"wiley",
                r"nature\.com",
                r"science\.org",
                r"cell\.com",
            ],
        ),
        compile(
            SourceKind::Government,
            &[
                r"\.gov/",
                r"\.gov\.uk",
                r"europa\.eu",
                r"un\.org",
                r"who\.int",
                r"nasa\.gov",
                r"cdc\.gov",
            ],
        ),
        compile(
            SourceKind::News,
            &[
                r"bbc\.com",
                r"reuters\.com",
                r"nytimes\.com",
                r"washingtonpost",
                r"theguardian",
                r"cnn\.com",
                r"npr\.org",
                r"apnews\.com",
            ],
        ),
        compile(
            SourceKind::Books,
            &[r"books\.google", r"archive\.org", r"gutenberg\.org"],
        ),
    ]
});

static URL_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)https?://([^/\s|\]}<>"']+)"#).unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// Sources newer than this many years count as recent
const RECENT_YEARS: i32 = 5;

/// Per-kind reliable source counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub academic: usize,
    pub government: usize,
    pub news: usize,
    pub books: usize,
}

impl SourceCounts {
    pub fn total(&self) -> usize {
        self.academic + self.government + self.news + self.books
    }
}

/// Analyzer for references and external links
pub struct ReferenceAnalyzer {
    current_year: i32,
}

impl ReferenceAnalyzer {
    /// Create an analyzer that measures recency against `current_year`
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Analyzer using the current UTC year
    pub fn for_current_year() -> Self {
        use chrono::Datelike;
        Self::new(chrono::Utc::now().year())
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Analyze wikitext together with the article's external links
    pub fn analyze_sources(&self, content: &str, external_links: &[String]) -> ReferenceScore {
        let all_sources = format!("{} {}", content, external_links.join(" "));
        let counts = classify_sources(&all_sources);
        let link_count = external_links.len();

        let source_quality =
            (counts.total() as f64 / link_count.max(1) as f64 * 35.0).min(35.0);
        let source_diversity = diversity_score(distinct_domains(&all_sources));
        let source_recency = self.recency_score(content);

        let count_tier = match link_count {
            50..=usize::MAX => 25.0,
            25..=49 => 20.0,
            10..=24 => 15.0,
            5..=9 => 10.0,
            _ => 0.0,
        };
        let score = count_tier
            + source_quality
            + source_diversity.min(25) as f64
            + source_recency.min(15) as f64;

        ReferenceScore {
            score: clamp_score(score),
            total_references: link_count,
            reliable_sources: counts.total(),
            external_links: link_count,
            source_quality,
            source_diversity,
            source_recency,
            academic_sources: counts.academic,
            government_sources: counts.government,
            news_sources: counts.news,
        }
    }

    /// Share of four-digit years within the recent window, scaled to 0-15
    fn recency_score(&self, content: &str) -> u8 {
        let years: Vec<i32> = YEAR
            .find_iter(content)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if years.is_empty() {
            return 0;
        }
        let recent = years
            .iter()
            .filter(|&&year| self.current_year - year <= RECENT_YEARS)
            .count();
        (recent as f64 / years.len() as f64 * 15.0).round() as u8
    }
}

impl MetricAnalyzer for ReferenceAnalyzer {
    type Output = ReferenceScore;

    fn analyze(&self, article: &Article) -> ReferenceScore {
        let mut score = self.analyze_sources(&article.content, &article.external_links);
        if !article.references.is_empty() {
            score.total_references = article.references.len();
        }
        score
    }
}

/// Count reliable-source pattern matches per kind
pub fn classify_sources(text: &str) -> SourceCounts {
    let mut counts = SourceCounts::default();
    for group in RELIABLE_SOURCES.iter() {
        let matches: usize = group.patterns.iter().map(|re| re.find_iter(text).count()).sum();
        match group.kind {
            SourceKind::Academic => counts.academic += matches,
            SourceKind::Government => counts.government += matches,
            SourceKind::News => counts.news += matches,
            SourceKind::Books => counts.books += matches,
        }
    }
    counts
}

/// Distinct lowercase hostnames of http(s) URLs, `www.` stripped
pub fn distinct_domains(text: &str) -> HashSet<String> {
    URL_HOST
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| {
            let host = m.as_str().to_lowercase();
            host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
        })
        .collect()
}

fn diversity_score(domains: HashSet<String>) -> u8 {
    match domains.len() {
        20..=usize::MAX => 25,
        15..=19 => 20,
        10..=14 => 15,
        5..=9 => 10,
        n => (n * 2).min(10) as u8,
    }
}
