use blog_core::{Error, Result};
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://ai-blog-engine.io";

/// Canonical site origin used to build absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrl {
    base: String,
}

impl SiteUrl {
    pub fn parse(site_url: &str) -> Result<Self> {
        let trimmed = site_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| Error::Config(format!("Invalid site URL {}: {}", trimmed, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!("Site URL must be http(s): {}", trimmed)));
        }
        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Joins a site path onto the origin. Paths that are already absolute
    /// http(s) URLs are returned as they are.
    pub fn to_absolute(&self, path: &str) -> String {
        if let Ok(url) = Url::parse(path) {
            if matches!(url.scheme(), "http" | "https") {
                return path.to_string();
            }
        }
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }
}
