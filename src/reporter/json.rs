//! JSON reporter for machine-readable output

use crate::analyzer::BatchReport;
use crate::guidelines::GuidelineCatalog;
use crate::{AnalysisResult, Grade, GuidelineDefinition};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single analysis result as JSON
    pub fn report(&self, result: &AnalysisResult) -> String {
        self.render(result, "{}")
    }

    /// Report multiple results as JSON array
    pub fn report_many(&self, results: &[AnalysisResult]) -> String {
        self.render(results, "[]")
    }

    /// Report with batch summary
    pub fn report_with_summary(&self, results: &[AnalysisResult], batch: &BatchReport) -> String {
        let output = JsonOutput {
            results,
            summary: JsonSummary {
                average_grade: Grade::from_score(batch.average_score),
                batch,
            },
        };
        self.render(&output, "{}")
    }

    /// The guideline catalog as a JSON array
    pub fn report_catalog(&self, catalog: &GuidelineCatalog) -> String {
        let entries: Vec<&GuidelineDefinition> = catalog.iter().collect();
        self.render(&entries, "[]")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [AnalysisResult],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    average_grade: Grade,
    #[serde(flatten)]
    batch: &'a BatchReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::Article;

    fn make_result(title: &str, content: &str) -> AnalysisResult {
        AnalysisEngine::new().with_current_year(2024).analyze(&Article {
            title: title.to_string(),
            extract: "A short lead. It has two sentences.".to_string(),
            content: content.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_report_uses_camel_case() {
        let json = JsonReporter::new().report(&make_result("Cat", "The best cat."));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Cat");
        assert!(value["score"]["readability"]["averageSentenceLength"].is_number());
        assert!(value["score"]["citations"]["citationDensity"].is_number());
        assert_eq!(value["violations"][0]["guideline"]["shortCode"], "WP:PEACOCK");
        assert_eq!(value["violations"][0]["location"]["column"], 5);
        assert_eq!(value["grade"], "F");
    }

    #[test]
    fn test_report_round_trips() {
        let result = make_result("Cat", "== A ==\nText.<ref>x</ref>");
        let json = JsonReporter::new().pretty().report(&result);
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, result.score);
        assert_eq!(back.suggestions, result.suggestions);
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_report_many_is_array() {
        let results = vec![make_result("A", ""), make_result("B", "")];
        let value: serde_json::Value =
            serde_json::from_str(&JsonReporter::new().report_many(&results)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_with_summary() {
        let results = vec![make_result("A", ""), make_result("B", "")];
        let batch = BatchReport::from_results(&results);
        let json = JsonReporter::new().report_with_summary(&results, &batch);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["totalArticles"], 2);
        assert!(value["summary"]["averageGrade"].is_string());
        assert!(value["summary"]["metrics"]["readability"]["median"].is_number());
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_report_catalog() {
        let json = JsonReporter::new().report_catalog(GuidelineCatalog::builtin());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 6);
        assert_eq!(value[0]["id"], "npov");
        assert_eq!(value[0]["severity"], "critical");
    }
}
