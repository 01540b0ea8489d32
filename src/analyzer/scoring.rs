//! Score aggregation: topic-dependent weights and the overall score

use crate::error::{Result, WikigradeError};
use crate::{CitationScore, Grade, QualityScore, ReadabilityScore, ReferenceScore, StructureScore};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SCIENTIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(research|study|analysis|scientific|academic)\b").unwrap());
static BIOGRAPHICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(born|died|biography|life|career)\b").unwrap());
static HISTORICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(history|historical|century|ancient|medieval)\b").unwrap());

/// Allowed drift when checking that weights sum to 1.0
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Kind of article, detected from the extract (affects scoring weights)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopicProfile {
    /// Research and academic subjects
    Scientific,
    /// People
    Biographical,
    /// Periods and past events
    Historical,
    #[default]
    General,
}

impl TopicProfile {
    /// Classify an extract. Scientific wins over biographical, which wins over historical.
    pub fn detect(extract: &str) -> Self {
        if SCIENTIFIC.is_match(extract) {
            TopicProfile::Scientific
        } else if BIOGRAPHICAL.is_match(extract) {
            TopicProfile::Biographical
        } else if HISTORICAL.is_match(extract) {
            TopicProfile::Historical
        } else {
            TopicProfile::General
        }
    }

    pub fn all() -> [TopicProfile; 4] {
        [
            TopicProfile::Scientific,
            TopicProfile::Biographical,
            TopicProfile::Historical,
            TopicProfile::General,
        ]
    }
}

impl std::fmt::Display for TopicProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicProfile::Scientific => write!(f, "Scientific"),
            TopicProfile::Biographical => write!(f, "Biographical"),
            TopicProfile::Historical => write!(f, "Historical"),
            TopicProfile::General => write!(f, "General"),
        }
    }
}

impl std::str::FromStr for TopicProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scientific" => Ok(TopicProfile::Scientific),
            "biographical" => Ok(TopicProfile::Biographical),
            "historical" => Ok(TopicProfile::Historical),
            "general" => Ok(TopicProfile::General),
            other => Err(format!("unknown topic `{}`", other)),
        }
    }
}

/// Scoring weights for the four axes. Always sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub readability: f64,
    pub citations: f64,
    pub references: f64,
    pub structure: f64,
}

impl ScoringWeights {
    /// Get the weights for a topic profile
    pub fn for_topic(topic: TopicProfile) -> Self {
        match topic {
            TopicProfile::Scientific => Self {
                readability: 0.20,
                citations: 0.40,
                references: 0.30,
                structure: 0.10,
            },
            TopicProfile::Biographical => Self {
                readability: 0.30,
                citations: 0.25,
                references: 0.25,
                structure: 0.20,
            },
            TopicProfile::Historical => Self {
                readability: 0.25,
                citations: 0.30,
                references: 0.30,
                structure: 0.15,
            },
            TopicProfile::General => Self {
                readability: 0.25,
                citations: 0.25,
                references: 0.25,
                structure: 0.25,
            },
        }
    }

    /// Custom weights, rejected unless non-negative and summing to 1.0
    pub fn custom(readability: f64, citations: f64, references: f64, structure: f64) -> Result<Self> {
        let weights = Self {
            readability,
            citations,
            references,
            structure,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.readability + self.citations + self.references + self.structure
    }

    pub fn validate(&self) -> Result<()> {
        let parts = [self.readability, self.citations, self.references, self.structure];
        let sum = self.sum();
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) || (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(WikigradeError::InvalidWeights { sum });
        }
        Ok(())
    }

    /// Calculate the weighted overall score (0-100)
    pub fn calculate_total(
        &self,
        readability: &ReadabilityScore,
        citations: &CitationScore,
        references: &ReferenceScore,
        structure: &StructureScore,
    ) -> u8 {
        let weighted = readability.score as f64 * self.readability
            + citations.score as f64 * self.citations
            + references.score as f64 * self.references
            + structure.score as f64 * self.structure;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::for_topic(TopicProfile::General)
    }
}

/// How weights are chosen for an article
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeightStrategy {
    /// Detect the topic from the extract
    #[default]
    Auto,
    /// Always use one topic's weights
    Topic(TopicProfile),
    /// Fixed custom weights
    Fixed(ScoringWeights),
}

/// Combines the four sub-scores into a [`QualityScore`]
pub struct ScoreAggregator {
    strategy: WeightStrategy,
}

impl ScoreAggregator {
    pub fn new(strategy: WeightStrategy) -> Self {
        Self { strategy }
    }

    /// Select the topic and weights for an extract
    pub fn select(&self, extract: &str) -> (TopicProfile, ScoringWeights) {
        match self.strategy {
            WeightStrategy::Auto => {
                let topic = TopicProfile::detect(extract);
                (topic, ScoringWeights::for_topic(topic))
            }
            WeightStrategy::Topic(topic) => (topic, ScoringWeights::for_topic(topic)),
            WeightStrategy::Fixed(weights) => (TopicProfile::detect(extract), weights),
        }
    }

    /// Combine sub-scores with the given weights
    pub fn combine(
        weights: &ScoringWeights,
        readability: ReadabilityScore,
        citations: CitationScore,
        references: ReferenceScore,
        structure: StructureScore,
    ) -> QualityScore {
        let overall = weights.calculate_total(&readability, &citations, &references, &structure);
        QualityScore {
            overall,
            readability,
            citations,
            references,
            structure,
        }
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - Well written, thoroughly cited and well organized",
            Grade::B => "Good - Solid article with room for improvement",
            Grade::C => "Fair - Covers the basics but needs more sourcing or structure",
            Grade::D => "Poor - Significant readability, sourcing or structure problems",
            Grade::F => "Failing - Needs major work before it meets editorial standards",
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(WeightStrategy::Auto)
    }
}
