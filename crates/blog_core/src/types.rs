use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POST_IMAGE: &str = "/images/default-blog-image.jpg";

/// Key/value metadata at the top of a post, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later keys overwrite earlier ones but keep the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value only when it is present and non-empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A markdown post as read from disk.
#[derive(Debug, Clone)]
pub struct BlogDocument {
    pub path: PathBuf,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl BlogDocument {
    /// File name without the `.md` extension.
    pub fn slug(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A post with every frontmatter field resolved to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub read_time: String,
    pub image: String,
    pub content: String,
}

impl BlogPost {
    /// Resolves every missing or empty frontmatter field to its default.
    pub fn from_document(doc: &BlogDocument) -> Self {
        let fm = &doc.frontmatter;
        let field = |key: &str, default: &str| fm.non_empty(key).unwrap_or(default).to_string();

        Self {
            slug: doc.slug(),
            title: field("title", "Untitled"),
            excerpt: field("excerpt", ""),
            author: field("author", "Anonymous"),
            date: fm
                .non_empty("date")
                .map(str::to_string)
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            category: field("category", "Uncategorized"),
            read_time: field("readTime", "5 min read"),
            image: field("image", DEFAULT_POST_IMAGE),
            content: doc.body.trim().to_string(),
        }
    }
}

/// One generated image variant competing for publication.
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    /// 1-based position in the candidate list.
    pub index: usize,
    pub prompt: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub approved: bool,
    pub reason: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl QualityVerdict {
    pub fn unavailable() -> Self {
        Self {
            approved: true,
            reason: "Quality check unavailable".to_string(),
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageScores {
    #[serde(default)]
    pub relevance: f32,
    #[serde(default)]
    pub quality: f32,
    #[serde(default)]
    pub composition: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionVerdict {
    pub selected_index: usize,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub scores: BTreeMap<String, ImageScores>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_insert_keeps_order() {
        let mut fm = Frontmatter::new();
        fm.insert("title", "First");
        fm.insert("image", "/a.png");
        fm.insert("title", "Second");

        let keys: Vec<&str> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "image"]);
        assert_eq!(fm.get("title"), Some("Second"));
        assert_eq!(fm.len(), 2);
    }

    #[test]
    fn test_non_empty_skips_blank_values() {
        let mut fm = Frontmatter::new();
        fm.insert("excerpt", "");
        assert_eq!(fm.get("excerpt"), Some(""));
        assert_eq!(fm.non_empty("excerpt"), None);
    }

    #[test]
    fn test_post_defaults_missing_fields() {
        let mut frontmatter = Frontmatter::new();
        frontmatter.insert("title", "Hello");
        frontmatter.insert("date", "2024-01-15");
        frontmatter.insert("category", "");
        let doc = BlogDocument {
            path: PathBuf::from("content/blog/2024-01-15-hello.md"),
            frontmatter,
            body: "\n# Heading\n\nText\n".to_string(),
        };

        let post = BlogPost::from_document(&doc);
        assert_eq!(post.slug, "2024-01-15-hello");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.author, "Anonymous");
        assert_eq!(post.category, "Uncategorized");
        assert_eq!(post.read_time, "5 min read");
        assert_eq!(post.image, DEFAULT_POST_IMAGE);
        assert_eq!(post.date, "2024-01-15");
        assert_eq!(post.content, "# Heading\n\nText");
    }

    #[test]
    fn test_selection_verdict_wire_names() {
        let json = r#"{
            "selectedIndex": 2,
            "reason": "Best composition",
            "scores": {
                "image1": {"relevance": 8, "quality": 7, "composition": 8},
                "image2": {"relevance": 9, "quality": 8, "composition": 9}
            }
        }"#;
        let verdict: SelectionVerdict = serde_json::from_str(json).unwrap();
        assert_eq!(verdict.selected_index, 2);
        assert_eq!(verdict.scores["image2"].composition, 9.0);
    }

    #[test]
    fn test_quality_verdict_defaults_suggestions() {
        let verdict: QualityVerdict =
            serde_json::from_str(r#"{"approved": true, "reason": "ok"}"#).unwrap();
        assert!(verdict.suggestions.is_empty());
    }
}
