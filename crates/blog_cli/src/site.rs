use std::path::{Path, PathBuf};

use blog_content::rewrite_png_references;
use blog_imaging::{optimize_directory, OptimizeSummary};
use blog_seo::{write_site_files, SiteFiles, SiteUrl, DEFAULT_SITE_URL};
use clap::{Parser, Subcommand};
use tracing::{error, info};

pub const SITE_URL_VAR: &str = "VITE_SITE_URL";
const DEFAULT_CONTENT_DIR: &str = "src/content/blog";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Maintenance tasks for the static blog.
#[derive(Parser, Debug)]
#[command(name = "blog-site", author, version, about, long_about = None)]
pub struct SiteCli {
    #[command(subcommand)]
    pub command: SiteCommands,
}

#[derive(Subcommand, Debug)]
pub enum SiteCommands {
    /// Write sitemap.xml and robots.txt
    Seo {
        #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
        content_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_PUBLIC_DIR)]
        public_dir: PathBuf,
        /// Defaults to $VITE_SITE_URL, then https://ai-blog-engine.io
        #[arg(long)]
        site_url: Option<String>,
    },
    /// Convert blog PNGs that have no WebP sibling yet
    OptimizeImages {
        #[arg(long, default_value = blog_pipeline::DEFAULT_IMAGES_DIR)]
        images_dir: PathBuf,
    },
    /// Point posts at WebP images wherever one exists
    UpdatePaths {
        #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
        content_dir: PathBuf,
        #[arg(long, default_value = blog_pipeline::DEFAULT_IMAGES_DIR)]
        images_dir: PathBuf,
    },
}

/// `--site-url`, else the environment value, else the default.
pub fn resolve_site_url(flag: Option<String>, env_value: Option<String>) -> String {
    flag.or(env_value)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
}

pub fn seo(content_dir: &Path, public_dir: &Path, site_url: &str) -> anyhow::Result<SiteFiles> {
    let site = SiteUrl::parse(site_url)?;
    Ok(write_site_files(&site, content_dir, public_dir)?)
}

pub fn optimize_images(images_dir: &Path) -> anyhow::Result<OptimizeSummary> {
    let summary = optimize_directory(images_dir)?;
    if !summary.converted.is_empty() {
        info!("✨ Blog image optimization complete!");
    }
    Ok(summary)
}

/// Optional step: failures are logged and reported as zero updates.
pub fn update_paths(content_dir: &Path, images_dir: &Path) -> usize {
    info!("🔄 Updating blog markdown files to use WebP images...");
    match rewrite_png_references(content_dir, images_dir) {
        Ok(updated) => {
            info!("✨ Blog path update complete! Updated {} file(s)", updated);
            if updated == 0 {
                info!("   All files already use WebP images");
            }
            updated
        }
        Err(e) => {
            error!("❌ Error during blog path update: {}", e);
            0
        }
    }
}
