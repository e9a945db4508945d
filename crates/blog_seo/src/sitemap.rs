use std::fmt;
use std::path::Path;

use blog_content::{list_post_paths, load_document, parse_post_date};
use blog_core::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::site::SiteUrl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFreq::Weekly => write!(f, "weekly"),
            ChangeFreq::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

pub fn static_entries(site: &SiteUrl) -> Vec<SitemapEntry> {
    vec![
        SitemapEntry {
            loc: site.to_absolute("/"),
            lastmod: None,
            changefreq: ChangeFreq::Weekly,
            priority: 1.0,
        },
        SitemapEntry {
            loc: site.to_absolute("/blog"),
            lastmod: None,
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
        },
    ]
}

/// One entry per post in `content_dir`. A missing directory has no posts.
pub fn post_entries(site: &SiteUrl, content_dir: &Path) -> Result<Vec<SitemapEntry>> {
    if !content_dir.is_dir() {
        warn!("Content directory {} not found, sitemap has no posts", content_dir.display());
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for path in list_post_paths(content_dir)? {
        let doc = load_document(&path)?;
        let lastmod = doc.frontmatter.non_empty("date").and_then(parse_post_date);
        entries.push(SitemapEntry {
            loc: site.to_absolute(&format!("/blog/{}", doc.slug())),
            lastmod,
            changefreq: ChangeFreq::Monthly,
            priority: 0.7,
        });
    }
    debug!("Collected {} post URLs", entries.len());
    Ok(entries)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
            ));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Static routes followed by every post.
pub fn build_sitemap(site: &SiteUrl, content_dir: &Path) -> Result<String> {
    let mut entries = static_entries(site);
    entries.extend(post_entries(site, content_dir)?);
    Ok(render_sitemap(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sitemap_lists_static_routes_then_posts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2024-01-15-post.md"), "---\ntitle: A\ndate: \"2024-01-15\"\n---\nBody").unwrap();
        fs::write(dir.path().join("undated.md"), "---\ntitle: B\n---\nBody").unwrap();
        fs::write(dir.path().join("post.template.md"), "---\ntitle: T\n---\n").unwrap();

        let site = SiteUrl::parse("https://example.com/").unwrap();
        let xml = build_sitemap(&site, dir.path()).unwrap();

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">
  <url>
    <loc>https://example.com/</loc>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/blog</loc>
    <changefreq>weekly</changefreq>
    <priority>0.8</priority>
  </url>
  <url>
    <loc>https://example.com/blog/2024-01-15-post</loc>
    <lastmod>2024-01-15T00:00:00.000Z</lastmod>
    <changefreq>monthly</changefreq>
    <priority>0.7</priority>
  </url>
  <url>
    <loc>https://example.com/blog/undated</loc>
    <changefreq>monthly</changefreq>
    <priority>0.7</priority>
  </url>
</urlset>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_missing_content_dir_has_only_static_routes() {
        let dir = tempfile::tempdir().unwrap();
        let site = SiteUrl::parse("https://example.com").unwrap();
        let xml = build_sitemap(&site, &dir.path().join("missing")).unwrap();
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_loc_is_escaped() {
        let entry = SitemapEntry {
            loc: "https://example.com/blog/a&b".to_string(),
            lastmod: None,
            changefreq: ChangeFreq::Monthly,
            priority: 0.7,
        };
        assert!(render_sitemap(&[entry]).contains("<loc>https://example.com/blog/a&amp;b</loc>"));
    }
}
