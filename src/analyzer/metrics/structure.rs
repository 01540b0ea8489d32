//! Structural organization: standard elements, navigation, section balance.

use super::{clamp_score, MetricAnalyzer};
use crate::{Article, Section, StructureScore};
use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCES_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)==\s*References\s*==").unwrap());
static INFOBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\{\{infobox").unwrap());
static CATEGORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[category:").unwrap());
static TOC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)__TOC__|__FORCETOC__").unwrap());
static NAVBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\{\{navbox").unwrap());
static SEE_ALSO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)==\s*See also\s*==").unwrap());

/// Points awarded per structural element
const INTRODUCTION_POINTS: u32 = 15;
const SECTIONS_POINTS: u32 = 15;
const REFERENCES_POINTS: u32 = 15;
const INFOBOX_POINTS: u32 = 10;
const CATEGORIES_POINTS: u32 = 5;
const TOC_POINTS: u32 = 10;
const NAVBOX_POINTS: u32 = 5;
const SEE_ALSO_POINTS: u32 = 5;
const MAX_BALANCE: f64 = 20.0;

/// Minimum lead length (characters) that counts as an introduction
const INTRODUCTION_MIN_CHARS: usize = 100;
/// More than this many sections counts as sectioned
const SECTIONED_MIN: usize = 3;

/// Navigation aids found in the wikitext
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    pub has_toc: bool,
    pub has_navbox: bool,
    pub has_see_also: bool,
}

impl Navigation {
    pub fn detect(content: &str) -> Self {
        Self {
            has_toc: TOC.is_match(content),
            has_navbox: NAVBOX.is_match(content),
            has_see_also: SEE_ALSO.is_match(content),
        }
    }

    /// Small navigation sub-score (TOC 5, navbox 3, see also 2)
    pub fn score(&self) -> u8 {
        let mut score = 0;
        if self.has_toc {
            score += 5;
        }
        if self.has_navbox {
            score += 3;
        }
        if self.has_see_also {
            score += 2;
        }
        score
    }
}

/// Analyzer for article structure
pub struct StructureAnalyzer;

impl StructureAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze wikitext together with its parsed sections
    pub fn analyze_layout(&self, content: &str, sections: &[Section]) -> StructureScore {
        let has_introduction = sections
            .first()
            .map(|s| s.content.chars().count() > INTRODUCTION_MIN_CHARS)
            .unwrap_or(false);
        let has_sections = sections.len() > SECTIONED_MIN;
        let has_references = REFERENCES_HEADING.is_match(content);
        let has_infobox = INFOBOX.is_match(content);
        let has_categories = CATEGORY.is_match(content);
        let navigation = Navigation::detect(content);
        let (balance, hierarchy) = section_balance(sections);

        let flags = [
            (has_introduction, INTRODUCTION_POINTS),
            (has_sections, SECTIONS_POINTS),
            (has_references, REFERENCES_POINTS),
            (has_infobox, INFOBOX_POINTS),
            (has_categories, CATEGORIES_POINTS),
            (navigation.has_toc, TOC_POINTS),
            (navigation.has_navbox, NAVBOX_POINTS),
            (navigation.has_see_also, SEE_ALSO_POINTS),
        ];
        let points: u32 = flags
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, points)| points)
            .sum();

        StructureScore {
            score: clamp_score(points as f64 + balance.min(MAX_BALANCE)),
            has_introduction,
            has_sections,
            has_references,
            section_balance: balance.round() as u8,
            header_hierarchy: hierarchy,
            has_infobox,
            has_categories,
            navigation_score: navigation.score(),
            section_count: sections.len(),
        }
    }
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricAnalyzer for StructureAnalyzer {
    type Output = StructureScore;

    fn analyze(&self, article: &Article) -> StructureScore {
        self.analyze_layout(&article.content, &article.sections)
    }
}

/// Balance (0-20) from the spread of section lengths, and the hierarchy score.
/// Both are zero with fewer than two sections.
fn section_balance(sections: &[Section]) -> (f64, u8) {
    if sections.len() <= 1 {
        return (0.0, 0);
    }
    let lengths: Vec<f64> = sections
        .iter()
        .map(|s| s.content.chars().count() as f64)
        .collect();
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
    let balance = (MAX_BALANCE - variance.sqrt() / 100.0).max(0.0);

    let hierarchy = if headings_nest(sections) { 100 } else { 50 };
    (balance, hierarchy)
}

/// A heading may go at most one level deeper than the one before it
pub fn headings_nest(sections: &[Section]) -> bool {
    sections
        .windows(2)
        .all(|pair| pair[1].level <= pair[0].level.saturating_add(1))
}
