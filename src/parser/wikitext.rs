//! Convert raw wikitext into an [`Article`]

use crate::{Article, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(=+)\s*(.*?)\s*(=+)\s*$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s|\]}<>"']+"#).unwrap());
static REF_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ref(?:\s[^>]*[^/>])?\s*>(.*?)</ref\s*>").unwrap());
static SELF_CLOSING_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<ref[^>]*/>").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static INNERMOST_TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^{}]*\}\}").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());
static NAMESPACED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[(?:category|file|image):[^\]]*\]\]").unwrap());
static PIPED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\]|]*\|([^\]]*)\]\]").unwrap());
static PLAIN_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]]*)\]\]").unwrap());
static LABELED_EXTERNAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[https?://[^\s\]]+\s+([^\]]*)\]").unwrap());
static BARE_EXTERNAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[https?://[^\s\]]+\]").unwrap());
static QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"'{2,}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Title given to the text before the first heading
pub const LEAD_TITLE: &str = "Introduction";

/// Parse a heading line into (level, title)
pub fn parse_heading(line: &str) -> Option<(u8, String)> {
    let caps = HEADING.captures(line.trim_end())?;
    let level = caps[1].len().min(caps[3].len());
    let title = caps[2].trim();
    if title.is_empty() || level > u8::MAX as usize {
        return None;
    }
    Some((level as u8, title.to_string()))
}

/// Build an article from wikitext.
///
/// The lead becomes a level-1 "Introduction" section when it has text, and
/// every heading starts a section of its own level.
pub fn parse_article(title: &str, wikitext: &str) -> Article {
    let mut lead = String::new();
    let mut sections: Vec<Section> = Vec::new();

    for line in wikitext.lines() {
        if let Some((level, heading)) = parse_heading(line) {
            sections.push(Section::new(heading, String::new(), level));
            continue;
        }
        let target = match sections.last_mut() {
            Some(section) => &mut section.content,
            None => &mut lead,
        };
        target.push_str(line);
        target.push('\n');
    }

    for section in &mut sections {
        section.content = section.content.trim().to_string();
    }
    let lead = lead.trim();
    if !lead.is_empty() {
        sections.insert(0, Section::new(LEAD_TITLE, lead, 1));
    }

    Article {
        title: title.to_string(),
        extract: plain_text(lead),
        content: wikitext.to_string(),
        sections,
        external_links: external_links(wikitext),
        references: references(wikitext),
    }
}

/// Distinct http(s) URLs in order of first appearance
pub fn external_links(wikitext: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL.find_iter(wikitext)
        .map(|m| m.as_str().to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Non-empty bodies of paired `<ref>` tags
pub fn references(wikitext: &str) -> Vec<String> {
    REF_BODY
        .captures_iter(wikitext)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|body| !body.is_empty())
        .collect()
}

/// Strip markup from wikitext, leaving readable prose on a single line
pub fn plain_text(wikitext: &str) -> String {
    let mut text = COMMENT.replace_all(wikitext, "").into_owned();
    text = REF_BODY.replace_all(&text, "").into_owned();
    text = SELF_CLOSING_REF.replace_all(&text, "").into_owned();
    // templates nest, so strip innermost first
    loop {
        let stripped = INNERMOST_TEMPLATE.replace_all(&text, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }
    text = HTML_TAG.replace_all(&text, "").into_owned();
    text = NAMESPACED_LINK.replace_all(&text, "").into_owned();
    text = PIPED_LINK.replace_all(&text, "$1").into_owned();
    text = PLAIN_LINK.replace_all(&text, "$1").into_owned();
    text = LABELED_EXTERNAL.replace_all(&text, "$1").into_owned();
    text = BARE_EXTERNAL.replace_all(&text, "").into_owned();
    text = QUOTES.replace_all(&text, "").into_owned();
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "{{Infobox animal|name=Cat}}\n\
'''Cats''' are small [[carnivore|carnivorous]] [[mammal]]s.<ref>{{cite book |title=Cats}}</ref>\n\
They purr.<ref name=\"p\" />\n\
\n\
== History ==\n\
Cats were domesticated long ago. See [https://example.org/cats the history].\n\
=== Egypt ===\n\
Revered in Egypt.<ref>https://www.jstor.org/stable/1</ref>\n\
== References ==\n\
{{reflist}}\n\
[[Category:Cats]]\n";

    #[test]
    fn test_sections_and_levels() {
        let article = parse_article("Cat", SAMPLE);
        let titles: Vec<(&str, u8)> = article
            .sections
            .iter()
            .map(|s| (s.title.as_str(), s.level))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("Introduction", 1),
                ("History", 2),
                ("Egypt", 3),
                ("References", 2)
            ]
        );
        assert!(article.sections[2].content.starts_with("Revered in Egypt."));
        assert_eq!(article.content, SAMPLE);
        assert_eq!(article.title, "Cat");
    }

    #[test]
    fn test_extract_strips_markup() {
        let article = parse_article("Cat", SAMPLE);
        assert_eq!(article.extract, "Cats are small carnivorous mammals. They purr.");
    }

    #[test]
    fn test_links_and_references() {
        let article = parse_article("Cat", SAMPLE);
        assert_eq!(
            article.external_links,
            vec!["https://example.org/cats", "https://www.jstor.org/stable/1"]
        );
        assert_eq!(
            article.references,
            vec!["{{cite book |title=Cats}}", "https://www.jstor.org/stable/1"]
        );
    }

    #[test]
    fn test_no_lead_no_introduction() {
        let article = parse_article("X", "== Only ==\nBody text.");
        assert_eq!(article.sections.len(), 1);
        assert_eq!(article.sections[0].title, "Only");
        assert!(article.extract.is_empty());
    }

    #[test]
    fn test_empty_wikitext() {
        let article = parse_article("Empty", "");
        assert!(article.sections.is_empty());
        assert!(article.extract.is_empty());
        assert!(article.external_links.is_empty());
        assert!(article.references.is_empty());
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading("== History =="), Some((2, "History".to_string())));
        assert_eq!(parse_heading("===Egypt==="), Some((3, "Egypt".to_string())));
        assert_eq!(parse_heading("==== =="), None);
        assert_eq!(parse_heading("Not a heading"), None);
        assert_eq!(parse_heading("a == b"), None);
    }

    #[test]
    fn test_duplicate_links_kept_once() {
        let links = external_links("http://a.com x http://a.com y https://b.org/z");
        assert_eq!(links, vec!["http://a.com", "https://b.org/z"]);
    }

    #[test]
    fn test_nested_templates_removed() {
        assert_eq!(plain_text("A {{outer|{{inner}}}} B"), "A B");
    }
}
