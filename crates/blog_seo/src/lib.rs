//! Search-engine files for the static site.

use std::fs;
use std::path::{Path, PathBuf};

use blog_core::Result;
use tracing::info;

pub mod site;
pub mod sitemap;

pub use site::{SiteUrl, DEFAULT_SITE_URL};
pub use sitemap::{build_sitemap, post_entries, render_sitemap, static_entries, ChangeFreq, SitemapEntry};

pub fn build_robots(site: &SiteUrl) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        site.to_absolute("/sitemap.xml")
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFiles {
    pub sitemap: PathBuf,
    pub robots: PathBuf,
}

/// Writes `sitemap.xml` and `robots.txt` into `public_dir`, creating it if
/// needed.
pub fn write_site_files(site: &SiteUrl, content_dir: &Path, public_dir: &Path) -> Result<SiteFiles> {
    let sitemap = build_sitemap(site, content_dir)?;
    fs::create_dir_all(public_dir)?;

    let files = SiteFiles {
        sitemap: public_dir.join("sitemap.xml"),
        robots: public_dir.join("robots.txt"),
    };
    fs::write(&files.sitemap, sitemap)?;
    fs::write(&files.robots, build_robots(site))?;
    info!("🗺️ Generated sitemap.xml and robots.txt in {}", public_dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots() {
        let site = SiteUrl::parse(DEFAULT_SITE_URL).unwrap();
        assert_eq!(
            build_robots(&site),
            "User-agent: *\nAllow: /\nSitemap: https://ai-blog-engine.io/sitemap.xml\n"
        );
    }

    #[test]
    fn test_write_site_files_creates_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("src/content/blog");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("hello.md"), "---\ntitle: Hello\n---\nHi").unwrap();

        let public = dir.path().join("public");
        let site = SiteUrl::parse("https://example.com").unwrap();
        let files = write_site_files(&site, &content, &public).unwrap();

        let sitemap = fs::read_to_string(&files.sitemap).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/blog/hello</loc>"));
        let robots = fs::read_to_string(&files.robots).unwrap();
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml\n"));
    }
}
