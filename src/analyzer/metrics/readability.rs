//! Readability statistics and indices for the article extract.

use super::{clamp_score, round1, words, MetricAnalyzer, SyllableEstimator};
use crate::{Article, ReadabilityScore};
use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Analyzer for readability of plain text
pub struct ReadabilityAnalyzer {
    syllables: SyllableEstimator,
}

impl ReadabilityAnalyzer {
    pub fn new() -> Self {
        Self {
            syllables: SyllableEstimator::new(),
        }
    }

    /// Analyze plain text. Text without words or sentences scores all zeros.
    pub fn analyze_text(&self, text: &str) -> ReadabilityScore {
        let sentences = SENTENCE_END
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count();
        let words = words(text);
        if sentences == 0 || words.is_empty() {
            return ReadabilityScore::default();
        }

        let word_count = words.len() as f64;
        let sentence_count = sentences as f64;
        let total_syllables = self.syllables.count_text(text) as f64;

        let average_sentence_length = word_count / sentence_count;
        let average_word_length =
            words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;
        let complex_words = words.iter().filter(|w| self.syllables.is_complex(w)).count();
        let complex_percentage = complex_words as f64 / word_count * 100.0;
        let letters = text.chars().filter(|c| c.is_alphabetic()).count() as f64;

        let flesch = (206.835
            - 1.015 * average_sentence_length
            - 84.6 * (total_syllables / word_count))
            .clamp(0.0, 100.0);
        let gunning_fog = 0.4 * (average_sentence_length + complex_percentage);
        let smog = 1.0430 * (complex_words as f64 * (30.0 / sentence_count)).sqrt() + 3.1291;
        let coleman_liau = 0.0588 * (letters / word_count * 100.0)
            - 0.296 * (sentence_count / word_count * 100.0)
            - 15.8;

        let mut score = 50.0;
        score += if flesch >= 80.0 {
            25.0
        } else if flesch >= 70.0 {
            20.0
        } else if flesch >= 60.0 {
            15.0
        } else if flesch >= 50.0 {
            10.0
        } else {
            0.0
        };
        score += if gunning_fog <= 8.0 {
            15.0
        } else if gunning_fog <= 12.0 {
            10.0
        } else if gunning_fog <= 16.0 {
            5.0
        } else {
            0.0
        };
        score += if average_sentence_length <= 15.0 {
            10.0
        } else if average_sentence_length <= 20.0 {
            5.0
        } else {
            0.0
        };

        ReadabilityScore {
            score: clamp_score(score),
            average_sentence_length: round1(average_sentence_length),
            average_word_length: round1(average_word_length),
            complex_words,
            flesch_score: flesch.round(),
            gunning_fog_index: round1(gunning_fog),
            smog_index: round1(smog),
            coleman_liau_index: round1(coleman_liau),
        }
    }
}

impl Default for ReadabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricAnalyzer for ReadabilityAnalyzer {
    type Output = ReadabilityScore;

    fn analyze(&self, article: &Article) -> ReadabilityScore {
        self.analyze_text(&article.extract)
    }
}
