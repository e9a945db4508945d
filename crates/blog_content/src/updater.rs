use std::fs;
use std::path::Path;

use blog_core::{Error, Result};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use tracing::{info, warn};

use crate::library::list_post_paths;

/// URL prefix under which blog images are served.
pub const PUBLIC_IMAGE_PREFIX: &str = "/images/blog";

lazy_static! {
    // Strict writer: both markers must be followed by a newline so the
    // file can be rebuilt byte for byte.
    static ref WRITE_BLOCK: Regex = Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap();
    static ref IMAGE_LINE: Regex = Regex::new(r"(?m)^image:[ \t]*.*$").unwrap();
    static ref PNG_REFERENCE: Regex =
        Regex::new(r#"image:\s*"?/images/blog/([^"\s]+)\.png"?"#).unwrap();
}

/// Public path of an asset published into the blog image directory.
pub fn public_image_path(asset: &Path) -> String {
    let name = asset
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", PUBLIC_IMAGE_PREFIX, name)
}

fn write_frame(text: &str) -> Result<regex::Captures<'_>> {
    WRITE_BLOCK
        .captures(text)
        .ok_or_else(|| Error::Frontmatter("No frontmatter found in markdown file".to_string()))
}

/// Fails unless `update_image` can rewrite the post at `path`. The reader
/// also accepts CRLF markers; the writer does not.
pub fn ensure_updatable(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Frontmatter(format!("{}: {}", path.display(), e)))?;
    write_frame(&text).map(|_| ())
}

/// Rewrites the `image:` line of the frontmatter block in `text`.
///
/// Only that line changes, even when its value is empty. A block without an
/// `image:` line gets one appended as its last line.
pub fn replace_image_line(text: &str, image: &str) -> Result<String> {
    let captures = write_frame(text)?;
    let block = &captures[1];
    let body = &captures[2];
    let line = format!("image: {}", image);

    let block = if IMAGE_LINE.is_match(block) {
        IMAGE_LINE.replace(block, NoExpand(&line)).into_owned()
    } else if block.is_empty() {
        line
    } else {
        format!("{}\n{}", block, line)
    };

    Ok(format!("---\n{}\n---\n{}", block, body))
}

/// Points the post at `image`, leaving every other byte in place.
pub fn update_image(path: impl AsRef<Path>, image: &str) -> Result<()> {
    let path = path.as_ref();
    info!("📝 Updating markdown file with new image path...");
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Frontmatter(format!("{}: {}", path.display(), e)))?;
    let updated = replace_image_line(&text, image)?;
    fs::write(path, updated)?;
    info!("✅ Updated image path: {}", image);
    Ok(())
}

/// Swaps `.png` hero references for their `.webp` siblings when those exist
/// in `images_dir`. Returns the number of posts rewritten.
pub fn rewrite_png_references(content_dir: impl AsRef<Path>, images_dir: impl AsRef<Path>) -> Result<usize> {
    let images_dir = images_dir.as_ref();
    let posts = list_post_paths(content_dir)?;
    info!("📁 Found {} markdown files to check", posts.len());

    let mut updated_files = 0;
    for path in posts {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let text = fs::read_to_string(&path)?;
        let mut changed = false;

        let rewritten = PNG_REFERENCE.replace_all(&text, |caps: &regex::Captures| {
            let stem = &caps[1];
            let webp = format!("{}.webp", stem);
            if images_dir.join(&webp).exists() {
                info!("🔄 {} - Updated {}.png → {}", name, stem, webp);
                changed = true;
                format!("image: {}/{}", PUBLIC_IMAGE_PREFIX, webp)
            } else {
                warn!("⚠️  {} - WebP version not found for {}.png", name, stem);
                caps[0].to_string()
            }
        });

        if changed {
            fs::write(&path, rewritten.as_bytes())?;
            updated_files += 1;
        } else {
            info!("✅ {} - No PNG references to update", name);
        }
    }
    Ok(updated_files)
}
