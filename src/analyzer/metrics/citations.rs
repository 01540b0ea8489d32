//! Citation counting, density, quality and distribution across sections.

use super::{clamp_score, round1, words, MetricAnalyzer};
use crate::{Article, CitationScore};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `<ref>...</ref>` and `<ref name="x">...</ref>`, but not self-closing `<ref/>`
static PAIRED_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ref(?:\s[^>]*[^/>])?\s*>.*?</ref\s*>").unwrap());
static SELF_CLOSING_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<ref[^>]*/>").unwrap());
static CITE_TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\{\{cite[^}]*\}\}").unwrap());
static FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());
static NAMED_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<ref\s+name\s*=").unwrap());
static SECTION_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"==\s*[^=]+\s*==").unwrap());
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<ref|cite|footnote|\[\d+\]").unwrap());

static QUALITY_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)doi\s*=\s*10\.",
        r"(?i)pmid\s*=\s*\d+",
        r"(?i)isbn\s*=\s*[\d-]+",
        r"(?i)journal\s*=\s*[^|}]+",
        r"(?i)publisher\s*=\s*[^|}]+",
        r"(?i)author\s*=\s*[^|}]+",
        r"(?i)date\s*=\s*\d{4}",
        r"(?i)url\s*=\s*https?://[^|}]+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Tier cutoffs for the quality and distribution bonuses, highest first.
///
/// Each tier awards 20, 15 and 10 points when the ratio is strictly above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationThresholds {
    pub quality: [f64; 3],
    pub distribution: [f64; 3],
}

impl Default for CitationThresholds {
    fn default() -> Self {
        Self {
            quality: [0.7, 0.5, 0.3],
            distribution: [0.8, 0.6, 0.4],
        }
    }
}

fn tier_bonus(ratio: f64, cutoffs: &[f64; 3]) -> u32 {
    if ratio > cutoffs[0] {
        20
    } else if ratio > cutoffs[1] {
        15
    } else if ratio > cutoffs[2] {
        10
    } else {
        0
    }
}

/// Analyzer for citations in wikitext
pub struct CitationAnalyzer {
    thresholds: CitationThresholds,
}

impl CitationAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: CitationThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: CitationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Analyze raw wikitext against the word count of the plain extract
    pub fn analyze_content(&self, content: &str, word_count: usize) -> CitationScore {
        let ref_tags = PAIRED_REF.find_iter(content).count();
        let self_closing = SELF_CLOSING_REF.find_iter(content).count();
        let templates: Vec<&str> = CITE_TEMPLATE
            .find_iter(content)
            .map(|m| m.as_str())
            .collect();
        let footnotes = FOOTNOTE.find_iter(content).count();

        let total_citations = ref_tags + self_closing + templates.len() + footnotes;
        if total_citations == 0 {
            return CitationScore::default();
        }
        let inline_citations = ref_tags + self_closing + footnotes;

        let citation_density = if word_count > 0 {
            total_citations as f64 / word_count as f64 * 1000.0
        } else {
            0.0
        };

        let quality_markers = count_quality_markers(&templates);
        let quality_ratio = quality_markers as f64 / total_citations as f64;
        let distribution = citation_distribution(content);

        let mut score = match total_citations {
            100..=usize::MAX => 35,
            50..=99 => 30,
            25..=49 => 25,
            10..=24 => 15,
            5..=9 => 10,
            _ => 0,
        };
        score += if citation_density >= 8.0 {
            25
        } else if citation_density >= 5.0 {
            20
        } else if citation_density >= 3.0 {
            15
        } else if citation_density >= 1.0 {
            10
        } else {
            0
        };
        score += tier_bonus(quality_ratio, &self.thresholds.quality);
        score += tier_bonus(distribution, &self.thresholds.distribution);

        CitationScore {
            score: clamp_score(score as f64),
            total_citations,
            inline_citations,
            citation_density: round1(citation_density),
            named_references: NAMED_REF.find_iter(content).count(),
            citation_quality: (quality_ratio * 100.0).round() as u32,
            distribution_score: (distribution * 100.0).round() as u32,
        }
    }
}

impl Default for CitationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricAnalyzer for CitationAnalyzer {
    type Output = CitationScore;

    fn analyze(&self, article: &Article) -> CitationScore {
        self.analyze_content(&article.content, words(&article.extract).len())
    }
}

/// Quality markers (doi, isbn, author, ...) inside citation templates
fn count_quality_markers(templates: &[&str]) -> usize {
    templates
        .iter()
        .map(|t| QUALITY_MARKERS.iter().map(|re| re.find_iter(t).count()).sum::<usize>())
        .sum()
}

/// Fraction of heading-delimited segments that carry a citation marker.
/// 1.0 when the content has no headings.
fn citation_distribution(content: &str) -> f64 {
    let segments: Vec<&str> = SECTION_HEADING.split(content).collect();
    if segments.len() <= 1 {
        return 1.0;
    }
    let cited = segments
        .iter()
        .filter(|s| CITATION_MARKER.is_match(s))
        .count();
    cited as f64 / segments.len() as f64
}
