//! Rule-based improvement suggestions derived from a quality score

pub mod ranker;

pub use ranker::SuggestionRanker;

use crate::{EnhancedSuggestion, Level, QualityScore, SuggestionCategory};

/// Sub-scores below this trigger critical suggestions
const CRITICAL_BELOW: u8 = 50;
/// Sub-scores below this trigger important suggestions
const IMPORTANT_BELOW: u8 = 70;

/// Emitted when no other rule fires
pub const POSITIVE_SUGGESTION: &str =
    "Excellent work! This article meets high quality standards across all metrics.";

/// One row of the suggestion table
pub struct SuggestionRule {
    pub id: &'static str,
    pub category: SuggestionCategory,
    pub impact: Level,
    pub effort: Level,
    pub text: &'static str,
    pub applies: fn(&QualityScore) -> bool,
}

impl SuggestionRule {
    fn suggestion(&self) -> EnhancedSuggestion {
        EnhancedSuggestion {
            category: self.category,
            suggestion: self.text.to_string(),
            impact: self.impact,
            effort: self.effort,
        }
    }
}

/// Suggestion rules in generation order.
///
/// Minor rules only fire while their axis is below a perfect score, so an
/// article scoring 100 everywhere gets the positive suggestion alone.
pub static SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        id: "add-inline-citations",
        category: SuggestionCategory::Critical,
        impact: Level::High,
        effort: Level::High,
        text: "Add inline citations throughout the article - this is essential for encyclopedic quality standards",
        applies: |s| s.citations.score < CRITICAL_BELOW,
    },
    SuggestionRule {
        id: "add-reliable-sources",
        category: SuggestionCategory::Critical,
        impact: Level::High,
        effort: Level::Medium,
        text: "Include more reliable sources, particularly academic journals and authoritative publications",
        applies: |s| s.references.score < CRITICAL_BELOW,
    },
    SuggestionRule {
        id: "shorten-sentences",
        category: SuggestionCategory::Important,
        impact: Level::Medium,
        effort: Level::Medium,
        text: "Break down long sentences to improve readability - aim for 15-20 words per sentence",
        applies: |s| {
            s.readability.score < IMPORTANT_BELOW && s.readability.average_sentence_length > 25.0
        },
    },
    SuggestionRule {
        id: "simplify-vocabulary",
        category: SuggestionCategory::Important,
        impact: Level::Medium,
        effort: Level::High,
        text: "Simplify vocabulary and sentence structure to make the article more accessible",
        applies: |s| s.readability.score < IMPORTANT_BELOW && s.readability.flesch_score < 50.0,
    },
    SuggestionRule {
        id: "add-introduction",
        category: SuggestionCategory::Important,
        impact: Level::High,
        effort: Level::Medium,
        text: "Add a comprehensive introduction that summarizes the main points",
        applies: |s| s.structure.score < IMPORTANT_BELOW && !s.structure.has_introduction,
    },
    SuggestionRule {
        id: "add-sections",
        category: SuggestionCategory::Important,
        impact: Level::Medium,
        effort: Level::Medium,
        text: "Organize content into more sections with clear headings for better structure",
        applies: |s| s.structure.score < IMPORTANT_BELOW && s.structure.section_count < 4,
    },
    SuggestionRule {
        id: "increase-density",
        category: SuggestionCategory::Minor,
        impact: Level::Medium,
        effort: Level::Medium,
        text: "Increase citation density - aim for 3-5 citations per 1000 words",
        applies: |s| s.citations.score < 100 && s.citations.citation_density < 3.0,
    },
    SuggestionRule {
        id: "diversify-sources",
        category: SuggestionCategory::Minor,
        impact: Level::Low,
        effort: Level::Low,
        text: "Diversify sources by including different types of publications and perspectives",
        applies: |s| s.references.score < 100 && s.references.source_diversity < 15,
    },
    SuggestionRule {
        id: "add-infobox",
        category: SuggestionCategory::Minor,
        impact: Level::Low,
        effort: Level::Low,
        text: "Consider adding an infobox to provide key facts at a glance",
        applies: |s| s.structure.score < 100 && !s.structure.has_infobox,
    },
];

/// Derive suggestions from a score, in rule order. Never empty.
pub fn generate_suggestions(score: &QualityScore) -> Vec<EnhancedSuggestion> {
    let mut suggestions: Vec<EnhancedSuggestion> = SUGGESTION_RULES
        .iter()
        .filter(|rule| (rule.applies)(score))
        .map(SuggestionRule::suggestion)
        .collect();

    if suggestions.is_empty() {
        suggestions.push(EnhancedSuggestion {
            category: SuggestionCategory::Minor,
            suggestion: POSITIVE_SUGGESTION.to_string(),
            impact: Level::Low,
            effort: Level::Low,
        });
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect() -> QualityScore {
        let mut score = QualityScore {
            overall: 100,
            ..Default::default()
        };
        score.readability.score = 100;
        score.citations.score = 100;
        score.references.score = 100;
        score.structure.score = 100;
        score
    }

    fn texts(suggestions: &[EnhancedSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.suggestion.as_str()).collect()
    }

    #[test]
    fn test_perfect_score_gets_one_positive_suggestion() {
        let suggestions = generate_suggestions(&perfect());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggestion, POSITIVE_SUGGESTION);
        assert_eq!(suggestions[0].category, SuggestionCategory::Minor);
    }

    #[test]
    fn test_zero_score_fires_critical_and_important() {
        let suggestions = generate_suggestions(&QualityScore::default());
        assert_eq!(suggestions[0].category, SuggestionCategory::Critical);
        assert_eq!(suggestions[1].category, SuggestionCategory::Critical);
        assert!(texts(&suggestions).contains(&SUGGESTION_RULES[4].text));
        assert!(texts(&suggestions).contains(&SUGGESTION_RULES[5].text));
        // short sentences keep the sentence-length rule quiet
        assert_eq!(suggestions.len(), SUGGESTION_RULES.len() - 1);
        assert!(!texts(&suggestions).contains(&SUGGESTION_RULES[2].text));
        assert!(!texts(&suggestions).contains(&POSITIVE_SUGGESTION));
    }

    #[test]
    fn test_zero_score_with_long_sentences_fires_every_rule() {
        let mut score = QualityScore::default();
        score.readability.average_sentence_length = 30.0;
        let suggestions = generate_suggestions(&score);
        assert_eq!(suggestions.len(), SUGGESTION_RULES.len());
        assert!(texts(&suggestions).contains(&SUGGESTION_RULES[2].text));
    }

    #[test]
    fn test_long_sentences_need_low_readability() {
        let mut score = perfect();
        score.readability.average_sentence_length = 30.0;
        assert_eq!(generate_suggestions(&score)[0].suggestion, POSITIVE_SUGGESTION);

        score.readability.score = 60;
        score.readability.flesch_score = 70.0;
        let suggestions = generate_suggestions(&score);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, SuggestionCategory::Important);
        assert!(suggestions[0].suggestion.starts_with("Break down long sentences"));
    }

    #[test]
    fn test_low_diversity_is_minor() {
        let mut score = perfect();
        score.references.score = 90;
        score.references.source_diversity = 10;
        let suggestions = generate_suggestions(&score);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, SuggestionCategory::Minor);
        assert_eq!(suggestions[0].impact, Level::Low);
        assert!(suggestions[0].suggestion.starts_with("Diversify sources"));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<&str> = SUGGESTION_RULES.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SUGGESTION_RULES.len());
    }
}
