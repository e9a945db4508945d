use std::fs;
use std::path::{Path, PathBuf};

use blog_core::{BlogPost, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::document::load_document;

/// Markdown posts in `dir`, skipping templates, sorted by file name.
pub fn list_post_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".md") && !name.contains(".template") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads every post in `dir`, newest first. Posts with an unparseable date
/// sort after dated ones.
pub fn load_posts(dir: impl AsRef<Path>) -> Result<Vec<BlogPost>> {
    let mut posts = list_post_paths(dir)?
        .iter()
        .map(|path| load_document(path).map(|doc| BlogPost::from_document(&doc)))
        .collect::<Result<Vec<_>>>()?;

    posts.sort_by(|a, b| {
        let a_date = parse_post_date(&a.date);
        let b_date = parse_post_date(&b.date);
        b_date.cmp(&a_date).then_with(|| a.slug.cmp(&b.slug))
    });
    debug!("Loaded {} posts", posts.len());
    Ok(posts)
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (read as UTC midnight).
pub fn parse_post_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
