//! Config schema and deserialization

use crate::analyzer::metrics::CitationThresholds;
use crate::analyzer::{ScoringWeights, TopicProfile};
use crate::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Guideline severity override (critical, important, recommended, off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidelineSeverity {
    Critical,
    Important,
    Recommended,
    /// Drop the guideline's violations entirely
    Off,
}

impl GuidelineSeverity {
    /// Convert to crate::Severity if not Off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            GuidelineSeverity::Critical => Some(Severity::Critical),
            GuidelineSeverity::Important => Some(Severity::Important),
            GuidelineSeverity::Recommended => Some(Severity::Recommended),
            GuidelineSeverity::Off => None,
        }
    }
}

/// Topic override: auto-detect or force a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopicSetting {
    #[default]
    Auto,
    Scientific,
    Biographical,
    Historical,
    General,
}

impl TopicSetting {
    /// The forced profile, or None for auto-detection
    pub fn profile(self) -> Option<TopicProfile> {
        match self {
            TopicSetting::Auto => None,
            TopicSetting::Scientific => Some(TopicProfile::Scientific),
            TopicSetting::Biographical => Some(TopicProfile::Biographical),
            TopicSetting::Historical => Some(TopicProfile::Historical),
            TopicSetting::General => Some(TopicProfile::General),
        }
    }
}

impl std::str::FromStr for TopicSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(TopicSetting::Auto);
        }
        let profile: TopicProfile = s.parse()?;
        Ok(match profile {
            TopicProfile::Scientific => TopicSetting::Scientific,
            TopicProfile::Biographical => TopicSetting::Biographical,
            TopicProfile::Historical => TopicSetting::Historical,
            TopicProfile::General => TopicSetting::General,
        })
    }
}

/// Per-path override configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional threshold override for matched files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Optional guideline overrides for matched files
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub guidelines: HashMap<String, GuidelineSeverity>,
}

/// Root config structure for .wikigraderc.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum overall score (exit 1 if below). Default: 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Fixed scoring weights, replacing topic detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoringWeights>,

    /// Force a topic profile (default: auto)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicSetting>,

    /// Reference year for source recency (default: current UTC year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_year: Option<i32>,

    /// Tier cutoffs for citation quality and distribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_thresholds: Option<CitationThresholds>,

    /// Per-guideline severity overrides. Key is the guideline id.
    #[serde(default)]
    pub guidelines: HashMap<String, GuidelineSeverity>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Per-path configuration overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ConfigOverride>,

    /// Config files this config was read from, the extends chain included
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Config written by `wikigrade init`
    pub fn starter() -> Self {
        Self {
            threshold: Some(60),
            topic: Some(TopicSetting::Auto),
            citation_thresholds: Some(CitationThresholds::default()),
            ignore: vec!["**/drafts/**".to_string()],
            ..Default::default()
        }
    }

    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_threshold: Option<u8>,
        cli_topic: Option<TopicSetting>,
        cli_year: Option<i32>,
    ) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_topic.is_some() {
            self.topic = cli_topic;
            // an explicit topic on the command line replaces fixed weights
            self.weights = None;
        }
        if cli_year.is_some() {
            self.current_year = cli_year;
        }
        self
    }

    /// Get the configured override for a guideline, if any
    pub fn guideline_severity(&self, id: &str) -> Option<GuidelineSeverity> {
        self.guidelines.get(id).copied()
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            guidelines: self.guidelines.clone(),
        };

        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                for (id, severity) in &override_cfg.guidelines {
                    effective.guidelines.insert(id.clone(), *severity);
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        patterns.iter().any(|pattern| match globset::Glob::new(pattern) {
            Ok(glob) => {
                glob.compile_matcher().is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
            }
            Err(_) => false,
        })
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        // weights and topic are one choice; a child setting either keeps it
        if self.weights.is_none() && self.topic.is_none() {
            self.weights = base.weights;
            self.topic = base.topic;
        }
        if self.current_year.is_none() {
            self.current_year = base.current_year;
        }
        if self.citation_thresholds.is_none() {
            self.citation_thresholds = base.citation_thresholds;
        }

        for (id, severity) in base.guidelines {
            self.guidelines.entry(id).or_insert(severity);
        }

        let mut all_ignores = base.ignore;
        for pattern in self.ignore.drain(..) {
            if !all_ignores.contains(&pattern) {
                all_ignores.push(pattern);
            }
        }
        self.ignore = all_ignores;

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;

        self.sources.extend(base.sources);
    }

    /// Whether `path` is one of the files this config was loaded from
    pub fn is_source(&self, path: &Path) -> bool {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.sources.contains(&path)
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub threshold: Option<u8>,
    pub guidelines: HashMap<String, GuidelineSeverity>,
}
