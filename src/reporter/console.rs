//! Console reporter with colored output

use crate::analyzer::{BatchReport, ScoreAggregator};
use crate::guidelines::GuidelineCatalog;
use crate::{AnalysisResult, Grade, GuidelineViolation, Severity, SuggestionCategory};
use colored::Colorize;

/// Suggestions shown without --verbose
const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Reporter for terminal output
///
/// Coloring follows `colored`'s global switch (`NO_COLOR`, `--no-color`).
pub struct ConsoleReporter {
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &AnalysisResult, show_guidelines: bool) {
        self.print_header(result);
        self.print_score(result);
        self.print_breakdown(result);

        if show_guidelines || self.verbose {
            self.print_violations(&result.violations);
            self.print_compliance(result);
        }

        self.print_suggestions(result);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[AnalysisResult], batch: &BatchReport, show_guidelines: bool) {
        for result in results {
            self.report(result, show_guidelines);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(batch);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, result: &AnalysisResult) {
        println!(
            "{}: {} ({})",
            result.title,
            result.score.overall,
            self.colorize_grade(&result.grade)
        );
    }

    /// Print the guideline catalog
    pub fn report_catalog(&self, catalog: &GuidelineCatalog) {
        println!();
        println!("{}", "Writing guidelines".bold());
        println!();
        for guideline in catalog.iter() {
            println!(
                "   {} {} [{}] {}",
                self.severity_icon(guideline.severity),
                guideline.short_code.bold(),
                guideline.id.dimmed(),
                guideline.name
            );
            println!("       {}", guideline.description);
            println!(
                "       {} {} | {}",
                "↳".dimmed(),
                guideline.category.to_string().dimmed(),
                guideline.url.dimmed()
            );
        }
        println!();
    }

    fn print_header(&self, result: &AnalysisResult) {
        println!();
        println!(
            "{}",
            format!("📊 Article Quality Analysis: {}", result.title).bold()
        );
        println!(
            "   Topic: {} | Sections: {} | Citations: {} | External links: {}",
            result.topic,
            result.score.structure.section_count,
            result.score.citations.total_citations,
            result.score.references.external_links
        );
        println!();
    }

    fn print_score(&self, result: &AnalysisResult) {
        let grade_str = self.colorize_grade(&result.grade);
        let score_bar = self.create_score_bar(result.score.overall);

        println!("   Score: {} {}", score_bar, grade_str.bold());
        println!(
            "   {}",
            ScoreAggregator::grade_description(result.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, result: &AnalysisResult) {
        println!("   {}", "Score Breakdown:".bold());

        let score = &result.score;
        let weights = &result.weights;
        let axes = [
            ("Readability", score.readability.score, weights.readability),
            ("Citations", score.citations.score, weights.citations),
            ("References", score.references.score, weights.references),
            ("Structure", score.structure.score, weights.structure),
        ];
        for (name, value, weight) in axes {
            let bar = self.create_mini_bar(value, 100);
            let score_str = format!("{:>3}/100", value);
            let colored_score = if value >= 80 {
                score_str.green()
            } else if value >= 60 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!(
                "   {} {} {} (weight {}%, contributes {:.1})",
                bar,
                colored_score,
                name,
                (weight * 100.0).round(),
                value as f64 * weight
            );
        }

        if self.verbose {
            let r = &score.readability;
            println!(
                "   {} Flesch {} | Fog {} | SMOG {} | Coleman-Liau {} | {} words/sentence",
                "↳".dimmed(),
                r.flesch_score,
                r.gunning_fog_index,
                r.smog_index,
                r.coleman_liau_index,
                r.average_sentence_length
            );
            let c = &score.citations;
            println!(
                "   {} {} inline, {} named, {} per 1000 words, quality {}%, spread {}%",
                "↳".dimmed(),
                c.inline_citations,
                c.named_references,
                c.citation_density,
                c.citation_quality,
                c.distribution_score
            );
            let f = &score.references;
            println!(
                "   {} {} reliable ({} academic, {} government, {} news)",
                "↳".dimmed(),
                f.reliable_sources,
                f.academic_sources,
                f.government_sources,
                f.news_sources
            );
        }
        println!();
    }

    fn print_violations(&self, violations: &[GuidelineViolation]) {
        if violations.is_empty() {
            println!("   {} No guideline violations found", "✓".green());
            println!();
            return;
        }
        println!("   {}", "Guideline Violations:".bold());

        let at = |severity: Severity| -> Vec<&GuidelineViolation> {
            violations
                .iter()
                .filter(|v| v.guideline.severity == severity)
                .collect()
        };
        for violation in at(Severity::Critical) {
            self.print_violation(violation);
        }
        for violation in at(Severity::Important) {
            self.print_violation(violation);
        }

        // Only show recommended items in verbose mode or if there are few total
        let recommended = at(Severity::Recommended);
        if self.verbose || violations.len() <= 5 {
            for violation in recommended {
                self.print_violation(violation);
            }
        } else if !recommended.is_empty() {
            println!(
                "   {} {} additional recommendations (use --verbose to show)",
                "ℹ".blue(),
                recommended.len()
            );
        }

        println!();
    }

    fn print_violation(&self, violation: &GuidelineViolation) {
        let location = match violation.location.column {
            Some(column) => format!("L{}:{}", violation.location.line, column),
            None => format!("L{}", violation.location.line),
        };
        println!(
            "   {} {} [{}] {}",
            self.severity_icon(violation.guideline.severity),
            location.dimmed(),
            violation.guideline.short_code.dimmed(),
            violation.message
        );
        if self.verbose {
            println!("       {} {}", "↳".dimmed(), violation.location.text.trim().dimmed());
        }
        println!("       {} {}", "→".dimmed(), violation.suggestion.italic());
    }

    fn print_compliance(&self, result: &AnalysisResult) {
        let compliance = &result.compliance;
        println!(
            "   Compliance: {} ({} critical, {} important, {} recommended)",
            compliance.score.to_string().bold(),
            compliance.summary.critical,
            compliance.summary.important,
            compliance.summary.recommended
        );
        for rec in &compliance.recommendations {
            println!("   {} {}", "→".cyan(), rec);
        }
        println!();
    }

    fn print_suggestions(&self, result: &AnalysisResult) {
        println!("   {}", "Suggestions:".bold());
        let limit = if self.verbose {
            result.suggestions.len()
        } else {
            DEFAULT_SUGGESTION_LIMIT
        };
        for suggestion in result.suggestions.iter().take(limit) {
            let tag = match suggestion.category {
                SuggestionCategory::Critical => "critical".red().bold(),
                SuggestionCategory::Important => "important".yellow(),
                SuggestionCategory::Minor => "minor".blue(),
            };
            println!("   {} [{}] {}", "→".cyan(), tag, suggestion.suggestion);
            if self.verbose {
                println!(
                    "       {} impact {}, effort {}",
                    "↳".dimmed(),
                    suggestion.impact,
                    suggestion.effort
                );
            }
        }
        let hidden = result.suggestions.len().saturating_sub(limit);
        if hidden > 0 {
            println!(
                "   {} {} more suggestions (use --verbose to show)",
                "ℹ".blue(),
                hidden
            );
        }
    }

    fn print_summary(&self, batch: &BatchReport) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Articles analyzed: {}",
            batch.total_articles.to_string().bold()
        );
        println!(
            "   Average score:     {} ({})",
            batch.average_score.to_string().bold(),
            self.colorize_grade(&Grade::from_score(batch.average_score))
        );
        for band in &batch.score_distribution {
            if band.count > 0 {
                println!("   {:>7}: {}", band.range, band.count);
            }
        }
        if let Some(best) = batch.top_performers.first() {
            println!("   Best:  {} ({})", best.title, best.overall);
        }
        if let Some(worst) = batch.needs_improvement.first() {
            println!("   Worst: {} ({})", worst.title, worst.overall);
        }
        let m = &batch.metrics;
        println!(
            "   Medians: readability {}, citations {}, references {}, structure {}",
            m.readability.median, m.citations.median, m.references.median, m.structure.median
        );
        println!();
    }

    fn severity_icon(&self, severity: Severity) -> colored::ColoredString {
        match severity {
            Severity::Critical => "✗".red(),
            Severity::Important => "⚠".yellow(),
            Severity::Recommended => "ℹ".blue(),
        }
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let bar = score_bar(score);
        if score >= 80 {
            bar.green().to_string()
        } else if score >= 60 {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    }

    fn create_mini_bar(&self, score: u8, max: u8) -> String {
        let filled = (score.min(max) as usize * 10) / max.max(1) as usize;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Twenty-cell bar with the percentage
fn score_bar(score: u8) -> String {
    let filled = (score.min(100) as usize * 20) / 100;
    let empty = 20 - filled;
    format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score)
}
