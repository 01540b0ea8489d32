//! Integration tests: full analysis pipeline against tests/fixtures/

use std::path::Path;
use wikigrade::analyzer::{AnalysisEngine, BatchReport, ScoringWeights, TopicProfile};
use wikigrade::parser::load_article;
use wikigrade::suggestions::POSITIVE_SUGGESTION;
use wikigrade::{
    analyze_article, detect_guideline_violations, generate_suggestions, score_article, Article,
    CitationScore, Grade, QualityScore, ReadabilityScore, ReferenceScore, Severity,
    StructureScore, SuggestionCategory,
};

const CURIE: &str = "tests/fixtures/Marie_Curie.wiki";
const ACME: &str = "tests/fixtures/Acme_Widgets.wiki";
const PHOTOSYNTHESIS: &str = "tests/fixtures/photosynthesis.json";

fn engine() -> AnalysisEngine {
    AnalysisEngine::new().with_current_year(2024)
}

fn analyze(path: &str) -> wikigrade::AnalysisResult {
    engine()
        .analyze_file(Path::new(path), None)
        .unwrap_or_else(|e| panic!("analyze_file({}) failed: {}", path, e))
}

// --- Worked examples ---

#[test]
fn short_plain_sentences_read_easily() {
    let article = Article {
        title: "Cat".to_string(),
        extract: "The cat sat. It was red.".to_string(),
        ..Default::default()
    };
    let score = score_article(&article);
    assert_eq!(score.readability.average_sentence_length, 3.0);
    assert!(score.readability.flesch_score >= 95.0);
    assert!(score.readability.score >= 85, "readability = {}", score.readability.score);
}

#[test]
fn three_refs_per_thousand_words() {
    let article = Article {
        title: "Dense".to_string(),
        extract: vec!["word"; 1000].join(" "),
        content: "<ref>x</ref> <ref>x</ref> <ref>x</ref>".to_string(),
        ..Default::default()
    };
    let score = score_article(&article);
    assert_eq!(score.citations.total_citations, 3);
    assert_eq!(score.citations.inline_citations, 3);
    assert_eq!(score.citations.citation_density, 3.0);
}

#[test]
fn biased_line_reports_three_violations() {
    let violations =
        detect_guideline_violations("This legendary company is clearly the best in Africa.");
    assert!(violations.len() >= 3);
    assert!(violations.iter().any(|v| v.guideline.id == "npov"));
    assert_eq!(
        violations
            .iter()
            .filter(|v| v.guideline.id == "peacock-terms")
            .count(),
        2
    );
}

#[test]
fn perfect_score_gets_only_praise() {
    let score = QualityScore {
        overall: 100,
        readability: ReadabilityScore {
            score: 100,
            average_sentence_length: 12.0,
            flesch_score: 80.0,
            ..Default::default()
        },
        citations: CitationScore {
            score: 100,
            citation_density: 9.0,
            ..Default::default()
        },
        references: ReferenceScore {
            score: 100,
            source_diversity: 25,
            ..Default::default()
        },
        structure: StructureScore {
            score: 100,
            has_introduction: true,
            has_infobox: true,
            section_count: 8,
            ..Default::default()
        },
    };
    let suggestions = generate_suggestions(&score);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].suggestion, POSITIVE_SUGGESTION);
}

#[test]
fn empty_article_scores_zero_everywhere() {
    let score = score_article(&Article::default());
    assert_eq!(score.overall, 0);
    assert_eq!(score.readability, ReadabilityScore::default());
    assert_eq!(score.citations, CitationScore::default());
    assert_eq!(score.references.score, 0);
    assert_eq!(score.structure.score, 0);
    assert_eq!(score.grade(), Grade::F);
}

// --- Fixture articles ---

#[test]
fn curie_structure_is_complete() {
    let r = analyze(CURIE);
    let s = &r.score.structure;
    assert_eq!(r.title, "Marie Curie");
    assert_eq!(s.section_count, 6);
    assert!(s.has_introduction);
    assert!(s.has_sections);
    assert!(s.has_references);
    assert!(s.has_infobox);
    assert!(s.has_categories);
    assert_eq!(s.navigation_score, 10);
    assert_eq!(s.header_hierarchy, 100);
}

#[test]
fn curie_citations_are_counted() {
    let r = analyze(CURIE);
    let c = &r.score.citations;
    assert_eq!(c.inline_citations, 6);
    assert_eq!(c.named_references, 2);
    assert!(c.total_citations > c.inline_citations);
    assert!(c.citation_quality > 0);
    assert_eq!(r.score.references.external_links, 3);
    assert_eq!(r.score.references.total_references, 5);
}

#[test]
fn curie_is_scientific() {
    let r = analyze(CURIE);
    assert_eq!(r.topic, TopicProfile::Scientific);
    assert_eq!(r.weights, ScoringWeights::for_topic(TopicProfile::Scientific));
}

#[test]
fn promotional_stub_scores_below_curated_article() {
    let curie = analyze(CURIE);
    let acme = analyze(ACME);
    assert!(
        acme.score.overall < curie.score.overall,
        "acme = {}, curie = {}",
        acme.score.overall,
        curie.score.overall
    );
    assert_eq!(acme.topic, TopicProfile::General);
}

#[test]
fn promotional_stub_breaks_content_policies() {
    let r = analyze(ACME);
    let ids: Vec<&str> = r.violations.iter().map(|v| v.guideline.id.as_str()).collect();
    for id in [
        "npov",
        "weasel-words",
        "peacock-terms",
        "no-original-research",
        "citing-sources",
    ] {
        assert!(ids.contains(&id), "missing {} in {:?}", id, ids);
    }
    assert!(r.compliance.summary.critical >= 3);
    assert!(r.compliance.score < 100);
    assert!(r
        .compliance
        .recommendations
        .iter()
        .any(|rec| rec == "Add citations to verify your claims"));
}

#[test]
fn violations_are_ranked_by_severity() {
    let r = analyze(ACME);
    let severities: Vec<Severity> = r.violations.iter().map(|v| v.guideline.severity).collect();
    let mut sorted = severities.clone();
    sorted.sort();
    assert_eq!(severities, sorted);
}

#[test]
fn suggestions_are_ranked_critical_first() {
    let r = analyze(ACME);
    assert!(!r.suggestions.is_empty());
    assert_eq!(r.suggestions[0].category, SuggestionCategory::Critical);
    let priorities: Vec<u8> = r.suggestions.iter().map(|s| s.category.priority()).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
}

#[test]
fn json_article_loads_with_its_own_sections() {
    let r = analyze(PHOTOSYNTHESIS);
    assert_eq!(r.title, "Photosynthesis");
    assert_eq!(r.topic, TopicProfile::Scientific);
    assert_eq!(r.score.structure.section_count, 3);
    assert_eq!(r.score.references.total_references, 1);
    assert_eq!(r.score.references.academic_sources, 2);
}

#[test]
fn lib_functions_agree_with_engine() {
    let article = load_article(Path::new(ACME)).unwrap();
    let via_lib = analyze_article(&article);
    let via_engine = AnalysisEngine::new().analyze(&article);
    assert_eq!(via_lib.score.readability, via_engine.score.readability);
    assert_eq!(via_lib.violations, via_engine.violations);
    assert_eq!(score_article(&article).citations, via_lib.score.citations);
}

#[test]
fn overall_is_weighted_sum_of_axes() {
    let r = analyze(CURIE);
    let expected = r.weights.calculate_total(
        &r.score.readability,
        &r.score.citations,
        &r.score.references,
        &r.score.structure,
    );
    assert_eq!(r.score.overall, expected);
    assert_eq!(r.grade, Grade::from_score(r.score.overall));
}

// --- Batch ---

#[test]
fn batch_report_over_fixtures() {
    let paths: Vec<_> = [CURIE, ACME, PHOTOSYNTHESIS]
        .iter()
        .map(|p| Path::new(p).to_path_buf())
        .collect();
    let results: Vec<_> = engine()
        .analyze_parallel(&paths, None)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(results[0].title, "Marie Curie");
    assert_eq!(results[1].title, "Acme Widgets");

    let batch = BatchReport::from_results(&results);
    assert_eq!(batch.total_articles, 3);
    let banded: usize = batch.score_distribution.iter().map(|b| b.count).sum();
    assert_eq!(banded, 3);
    assert_eq!(
        batch.needs_improvement.first().map(|a| a.title.as_str()),
        Some("Acme Widgets")
    );
}
