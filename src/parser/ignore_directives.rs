//! Parse wikigrade-ignore comment directives from wikitext

use crate::GuidelineViolation;
use std::collections::{HashMap, HashSet};

const IGNORE_NEXT_LINE: &str = "wikigrade-ignore-next-line";
const IGNORE: &str = "wikigrade-ignore";
const DISABLE: &str = "wikigrade-disable";
const ENABLE: &str = "wikigrade-enable";

/// Which guidelines are ignored on a given line
#[derive(Debug, Clone)]
pub enum LineIgnoreSet {
    /// Ignore every guideline on this line
    All,
    /// Ignore only these guideline ids
    Guidelines(HashSet<String>),
}

/// Ignore directives found in `<!-- ... -->` comments of one article
#[derive(Debug, Default)]
pub struct IgnoreDirectives {
    /// Per-line ignores (line is 1-indexed)
    line_ignores: HashMap<usize, LineIgnoreSet>,
    /// Inclusive (start_line, end_line) ranges where all guidelines are disabled
    disabled_ranges: Vec<(usize, usize)>,
}

impl IgnoreDirectives {
    /// Check if a guideline hit on `line` should be dropped
    pub fn is_ignored(&self, line: usize, guideline_id: &str) -> bool {
        if let Some(set) = self.line_ignores.get(&line) {
            let ignored = match set {
                LineIgnoreSet::All => true,
                LineIgnoreSet::Guidelines(ids) => ids.contains(guideline_id),
            };
            if ignored {
                return true;
            }
        }
        self.disabled_ranges
            .iter()
            .any(|(start, end)| line >= *start && line <= *end)
    }

    /// Drop violations covered by a directive
    pub fn filter(&self, violations: Vec<GuidelineViolation>) -> Vec<GuidelineViolation> {
        if self.is_empty() {
            return violations;
        }
        violations
            .into_iter()
            .filter(|v| !self.is_ignored(v.location.line, &v.guideline.id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.line_ignores.is_empty() && self.disabled_ranges.is_empty()
    }

    /// Parse wikitext for directives.
    ///
    /// `<!-- wikigrade-ignore-next-line -->` covers the following line,
    /// `<!-- wikigrade-ignore npov weasel-words -->` covers its own line
    /// (all guidelines when none are listed), and `wikigrade-disable` /
    /// `wikigrade-enable` bracket an ignored block.
    pub fn parse(wikitext: &str) -> Self {
        let mut line_ignores: HashMap<usize, LineIgnoreSet> = HashMap::new();
        let mut disabled_ranges: Vec<(usize, usize)> = Vec::new();
        let mut disable_start: Option<usize> = None;

        for (zero_indexed, line) in wikitext.lines().enumerate() {
            let line_no = zero_indexed + 1;
            if !line.contains("<!--") {
                continue;
            }

            if line.contains(IGNORE_NEXT_LINE) {
                line_ignores.insert(line_no + 1, LineIgnoreSet::All);
            } else if let Some(idx) = line.find(IGNORE) {
                let rest = &line[idx + IGNORE.len()..];
                let rest = rest.split("-->").next().unwrap_or("");
                let ids = parse_guideline_list(rest);
                let set = if ids.is_empty() {
                    LineIgnoreSet::All
                } else {
                    LineIgnoreSet::Guidelines(ids)
                };
                line_ignores.insert(line_no, set);
            }

            if line.contains(DISABLE) {
                disable_start = Some(line_no);
            }
            if line.contains(ENABLE) {
                if let Some(start) = disable_start.take() {
                    disabled_ranges.push((start, line_no));
                }
            }
        }

        // disable without enable runs to the end of the text
        if let Some(start) = disable_start {
            let end = wikitext.lines().count().max(1);
            disabled_ranges.push((start, end));
        }

        Self {
            line_ignores,
            disabled_ranges,
        }
    }
}

fn parse_guideline_list(s: &str) -> HashSet<String> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
