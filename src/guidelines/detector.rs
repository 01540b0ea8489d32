//! Line-by-line guideline violation detection driven by rule tables

use super::catalog::GuidelineCatalog;
use crate::error::{Result, WikigradeError};
use crate::{GuidelineDefinition, GuidelineViolation, Location};
use once_cell::sync::Lazy;
use regex::Regex;

/// How a phrase is matched against a line. Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Anywhere in the line, including inside longer words
    Substring,
    /// Only between word boundaries
    WholeWord,
}

/// A phrase and the remediation offered when it is found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    pub suggestion: String,
}

impl Phrase {
    pub fn new(text: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// What a rule looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Report each listed phrase found on a line, as `<label>: "<phrase>"`
    Phrases {
        mode: MatchMode,
        label: String,
        phrases: Vec<Phrase>,
    },
    /// Flag long, uncited lines that look like factual claims
    CitationNeed {
        min_length: usize,
        triggers: Vec<String>,
        message: String,
        suggestion: String,
    },
}

/// A detection rule tied to one catalog guideline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRule {
    pub id: String,
    pub guideline: String,
    pub kind: RuleKind,
}

impl DetectionRule {
    pub fn phrases(
        id: &str,
        guideline: &str,
        mode: MatchMode,
        label: &str,
        phrases: Vec<Phrase>,
    ) -> Self {
        Self {
            id: id.to_string(),
            guideline: guideline.to_string(),
            kind: RuleKind::Phrases {
                mode,
                label: label.to_string(),
                phrases,
            },
        }
    }

    /// Phrase rule where every phrase shares one suggestion
    pub fn phrase_list(
        id: &str,
        guideline: &str,
        mode: MatchMode,
        label: &str,
        phrases: &[&str],
        suggestion: &str,
    ) -> Self {
        let phrases = phrases.iter().map(|p| Phrase::new(*p, suggestion)).collect();
        Self::phrases(id, guideline, mode, label, phrases)
    }
}

static EXISTING_CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<ref|</ref>|\[\d+\]").unwrap());

/// The built-in rule table, in the order rules run on each line
pub fn builtin_rules() -> Vec<DetectionRule> {
    vec![
        DetectionRule::phrases(
            "npov-bias",
            "npov",
            MatchMode::Substring,
            "Biased phrase detected",
            vec![
                Phrase::new("obviously", "Remove or provide evidence"),
                Phrase::new("clearly", "Remove or provide evidence"),
                Phrase::new("of course", "Remove unnecessary emphasis"),
                Phrase::new("naturally", "State facts without emphasis"),
                Phrase::new("undoubtedly", "Use neutral language"),
                Phrase::new("without a doubt", "Use neutral language"),
            ],
        ),
        DetectionRule::phrase_list(
            "weasel-words",
            "weasel-words",
            MatchMode::Substring,
            "Weasel word detected",
            &[
                "some people",
                "many believe",
                "it is said",
                "it is believed",
                "some say",
                "critics say",
                "experts claim",
                "arguably",
                "it has been said",
                "widely regarded",
                "considered by many",
            ],
            "Specify who says this with a citation, or remove the claim",
        ),
        DetectionRule::phrase_list(
            "peacock-terms",
            "peacock-terms",
            MatchMode::WholeWord,
            "Peacock term detected",
            &[
                "legendary",
                "iconic",
                "world-famous",
                "world-renowned",
                "best",
                "greatest",
                "most important",
                "leading",
                "premier",
                "top",
                "prestigious",
                "acclaimed",
                "celebrated",
                "renowned",
                "groundbreaking",
                "revolutionary",
                "innovative",
            ],
            "Use neutral, factual language with citations",
        ),
        DetectionRule {
            id: "citation-needed".to_string(),
            guideline: "citing-sources".to_string(),
            kind: RuleKind::CitationNeed {
                min_length: 50,
                triggers: [
                    r"(?i)\b(was|were|is|are)\s+(born|founded|established|created|discovered)",
                    r"\b\d{4}\b",
                    r"(?i)\baccording to\b",
                    r"(?i)\bstudies? (show|indicate|suggest)",
                    r"(?i)\bresearch (shows|indicates|suggests)",
                    r"(?i)\bstatistics\b",
                    r"(?i)\bdata (shows|indicates|suggests)",
                ]
                .iter()
                .map(|p| p.to_string())
                .collect(),
                message: "This statement likely needs a citation".to_string(),
                suggestion: "Add <ref>reliable source</ref> after factual claims".to_string(),
            },
        },
        DetectionRule::phrase_list(
            "promotional",
            "npov",
            MatchMode::WholeWord,
            "Promotional language detected",
            &[
                "cutting-edge",
                "state-of-the-art",
                "world-class",
                "industry-leading",
                "award-winning",
                "unparalleled",
                "unmatched",
                "superior",
                "excellent",
                "outstanding",
                "exceptional",
                "remarkable",
            ],
            "Use neutral, encyclopedic language",
        ),
        DetectionRule::phrase_list(
            "original-research",
            "no-original-research",
            MatchMode::Substring,
            "Possible original research",
            &[
                "in my opinion",
                "i believe",
                "i think",
                "we can conclude",
                "this proves",
                "this shows that",
                "therefore",
                "thus we see",
                "it follows that",
            ],
            "Only include information that can be verified in reliable sources",
        ),
    ]
}

struct CompiledPhrase {
    text: String,
    suggestion: String,
    regex: Regex,
}

enum CompiledKind {
    Phrases {
        label: String,
        phrases: Vec<CompiledPhrase>,
    },
    CitationNeed {
        min_length: usize,
        triggers: Vec<Regex>,
        message: String,
        suggestion: String,
    },
}

struct CompiledRule {
    guideline: GuidelineDefinition,
    kind: CompiledKind,
}

impl CompiledRule {
    fn compile(rule: DetectionRule, catalog: &GuidelineCatalog) -> Result<Self> {
        let guideline = catalog.get(&rule.guideline)?.clone();
        let invalid = |reason: regex::Error| WikigradeError::InvalidRule {
            rule: rule.id.clone(),
            reason: reason.to_string(),
        };

        let kind = match rule.kind {
            RuleKind::Phrases {
                mode,
                label,
                phrases,
            } => {
                let phrases = phrases
                    .into_iter()
                    .map(|p| {
                        let escaped = regex::escape(&p.text);
                        let pattern = match mode {
                            MatchMode::Substring => format!("(?i){}", escaped),
                            MatchMode::WholeWord => format!(r"(?i)\b{}\b", escaped),
                        };
                        Ok(CompiledPhrase {
                            regex: Regex::new(&pattern).map_err(invalid)?,
                            text: p.text,
                            suggestion: p.suggestion,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                CompiledKind::Phrases { label, phrases }
            }
            RuleKind::CitationNeed {
                min_length,
                triggers,
                message,
                suggestion,
            } => CompiledKind::CitationNeed {
                min_length,
                triggers: triggers
                    .iter()
                    .map(|t| Regex::new(t).map_err(invalid))
                    .collect::<Result<Vec<_>>>()?,
                message,
                suggestion,
            },
        };

        Ok(Self { guideline, kind })
    }

    fn check_line(&self, line_number: usize, line: &str, out: &mut Vec<GuidelineViolation>) {
        match &self.kind {
            CompiledKind::Phrases { label, phrases } => {
                for phrase in phrases {
                    if let Some(m) = phrase.regex.find(line) {
                        let column = line[..m.start()].chars().count() + 1;
                        out.push(GuidelineViolation {
                            guideline: self.guideline.clone(),
                            location: Location::new(line_number, line).with_column(column),
                            message: format!("{}: \"{}\"", label, phrase.text),
                            suggestion: phrase.suggestion.clone(),
                            matched: Some(m.as_str().to_string()),
                        });
                    }
                }
            }
            CompiledKind::CitationNeed {
                min_length,
                triggers,
                message,
                suggestion,
            } => {
                if line.chars().count() <= *min_length
                    || line.trim_start().starts_with("==")
                    || EXISTING_CITATION.is_match(line)
                {
                    return;
                }
                if triggers.iter().any(|t| t.is_match(line)) {
                    out.push(GuidelineViolation {
                        guideline: self.guideline.clone(),
                        location: Location::new(line_number, line),
                        message: message.clone(),
                        suggestion: suggestion.clone(),
                        matched: None,
                    });
                }
            }
        }
    }
}

static BUILTIN: Lazy<GuidelineDetector> = Lazy::new(|| {
    GuidelineDetector::new(GuidelineCatalog::builtin(), builtin_rules())
        .unwrap_or_else(|e| panic!("built-in guideline rules do not match the catalog: {}", e))
});

/// Stateless per-line scanner.
///
/// Every rule runs on every line and every hit is kept, so one line can
/// yield several violations. Output is ordered by line, then rule, then phrase.
pub struct GuidelineDetector {
    rules: Vec<CompiledRule>,
}

impl GuidelineDetector {
    /// Compile a rule table against a catalog. Fails if a rule names a
    /// guideline missing from the catalog or carries an invalid pattern.
    pub fn new(catalog: &GuidelineCatalog, rules: Vec<DetectionRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| CompiledRule::compile(rule, catalog))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Detector for the built-in catalog and rules
    pub fn builtin() -> &'static GuidelineDetector {
        &BUILTIN
    }

    /// Scan text for violations
    pub fn detect(&self, text: &str) -> Vec<GuidelineViolation> {
        let mut violations = Vec::new();
        for (index, line) in text.lines().enumerate() {
            for rule in &self.rules {
                rule.check_line(index + 1, line, &mut violations);
            }
        }
        violations
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
