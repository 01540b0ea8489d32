//! Static catalog of writing guidelines, keyed by id

use crate::error::{Result, WikigradeError};
use crate::{GuidelineCategory, GuidelineDefinition, Severity};
use once_cell::sync::Lazy;

const BASE_URL: &str = "https://en.wikipedia.org/wiki/Wikipedia:";

/// (id, name, short code, description, category, severity, page)
type Entry = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    GuidelineCategory,
    Severity,
    &'static str,
);

const BUILTIN_ENTRIES: &[Entry] = &[
    (
        "npov",
        "Neutral Point of View",
        "WP:NPOV",
        "Articles must be written from a neutral point of view",
        GuidelineCategory::Policy,
        Severity::Critical,
        "Neutral_point_of_view",
    ),
    (
        "verifiability",
        "Verifiability",
        "WP:V",
        "Content must be verifiable in reliable sources",
        GuidelineCategory::Policy,
        Severity::Critical,
        "Verifiability",
    ),
    (
        "no-original-research",
        "No Original Research",
        "WP:NOR",
        "Articles must not publish original thought",
        GuidelineCategory::Policy,
        Severity::Critical,
        "No_original_research",
    ),
    (
        "citing-sources",
        "Citing Sources",
        "WP:CITE",
        "Add citations to verify your content",
        GuidelineCategory::Content,
        Severity::Important,
        "Citing_sources",
    ),
    (
        "weasel-words",
        "Avoid Weasel Words",
        "WP:WEASEL",
        "Avoid vague attributions like \"some people say\"",
        GuidelineCategory::Style,
        Severity::Important,
        "Manual_of_Style/Words_to_watch#Unsupported_attributions",
    ),
    (
        "peacock-terms",
        "Avoid Peacock Terms",
        "WP:PEACOCK",
        "Avoid promotional or subjective language",
        GuidelineCategory::Style,
        Severity::Important,
        "Manual_of_Style/Words_to_watch#Peacock_terms",
    ),
];

static BUILTIN: Lazy<GuidelineCatalog> = Lazy::new(|| {
    GuidelineCatalog::new(
        BUILTIN_ENTRIES
            .iter()
            .map(
                |(id, name, short_code, description, category, severity, page)| GuidelineDefinition {
                    id: id.to_string(),
                    name: name.to_string(),
                    short_code: short_code.to_string(),
                    description: description.to_string(),
                    category: *category,
                    severity: *severity,
                    url: format!("{}{}", BASE_URL, page),
                },
            )
            .collect(),
    )
});

/// Immutable table of guideline definitions in catalog order.
///
/// The built-in table is shared; custom catalogs can be built for tests or
/// alternative rule sets and handed to [`super::GuidelineDetector::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct GuidelineCatalog {
    entries: Vec<GuidelineDefinition>,
}

impl GuidelineCatalog {
    pub fn new(entries: Vec<GuidelineDefinition>) -> Self {
        Self { entries }
    }

    /// The built-in catalog
    pub fn builtin() -> &'static GuidelineCatalog {
        &BUILTIN
    }

    /// Look up a guideline by id
    pub fn get(&self, id: &str) -> Result<&GuidelineDefinition> {
        self.entries
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| WikigradeError::UnknownGuideline { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|g| g.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuidelineDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
