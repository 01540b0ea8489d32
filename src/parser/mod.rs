//! Article loading: JSON articles and raw wikitext files

pub mod ignore_directives;
pub mod wikitext;

pub use ignore_directives::IgnoreDirectives;
pub use wikitext::parse_article;

use crate::{Article, WikigradeError};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File extensions picked up when walking a directory
pub const ARTICLE_EXTENSIONS: &[&str] = &["wiki", "txt", "json"];

/// Whether `path` looks like an article file
pub fn is_article_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ARTICLE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Load an article from disk.
///
/// `.json` files hold a serialized [`Article`]; anything else is treated as
/// wikitext and titled after the file stem (underscores become spaces).
pub fn load_article(path: &Path) -> Result<Article> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read article: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let mut article: Article =
            serde_json::from_str(&raw).map_err(|e| WikigradeError::ArticleParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if article.title.trim().is_empty() {
            article.title = title_from_stem(path);
        }
        return Ok(article);
    }

    Ok(parse_article(&title_from_stem(path), &raw))
}

fn title_from_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_article_file() {
        assert!(is_article_file(Path::new("a/Cat.wiki")));
        assert!(is_article_file(Path::new("Cat.TXT")));
        assert!(is_article_file(Path::new("cat.json")));
        assert!(!is_article_file(Path::new("cat.md")));
        assert!(!is_article_file(Path::new("README")));
    }

    #[test]
    fn test_load_wikitext_titles_from_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("House_cat.wiki");
        fs::write(&path, "'''Cats''' purr.\n== Diet ==\nMice.").unwrap();
        let article = load_article(&path).unwrap();
        assert_eq!(article.title, "House cat");
        assert_eq!(article.extract, "Cats purr.");
        assert_eq!(article.sections.len(), 2);
    }

    #[test]
    fn test_load_json_article() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.json");
        fs::write(
            &path,
            r#"{"title": "Cat", "extract": "Cats purr.", "externalLinks": ["https://a.org"]}"#,
        )
        .unwrap();
        let article = load_article(&path).unwrap();
        assert_eq!(article.title, "Cat");
        assert_eq!(article.external_links, vec!["https://a.org"]);
    }

    #[test]
    fn test_untitled_json_article_titles_from_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Empty_page.json");
        fs::write(
            &path,
            r#"{"extract": "", "content": "", "externalLinks": [], "sections": []}"#,
        )
        .unwrap();
        let article = load_article(&path).unwrap();
        assert_eq!(article.title, "Empty page");
        assert!(article.sections.is_empty());
    }

    #[test]
    fn test_malformed_json_is_article_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_article(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WikigradeError>(),
            Some(WikigradeError::ArticleParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_article(Path::new("/definitely/not/here.wiki")).unwrap_err();
        assert!(err.to_string().contains("Failed to read article"));
    }
}
