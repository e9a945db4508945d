use std::fs;
use std::path::{Path, PathBuf};

use blog_core::{Error, Result};
use image::{GenericImageView, ImageFormat};
use tracing::{info, warn};

pub const TARGET_RATIO: f64 = 2.0;
pub const RATIO_TOLERANCE: f64 = 0.1;

/// Edge kept intact when cropping. Both point at the bottom-right corner
/// where the logo overlay sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AspectOutcome {
    AlreadyCorrect { ratio: f64 },
    Cropped { width: u32, height: u32, anchor: Anchor },
    /// Processing failed; the file was left as it was.
    Skipped(String),
}

/// Computes the 2:1 crop for an image, or `None` when the ratio is already
/// within tolerance.
pub fn crop_plan(width: u32, height: u32) -> Option<CropRect> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = width as f64 / height as f64;
    if (ratio - TARGET_RATIO).abs() <= RATIO_TOLERANCE {
        return None;
    }

    if ratio > TARGET_RATIO {
        let new_width = height * 2;
        Some(CropRect {
            x: width - new_width,
            y: 0,
            width: new_width,
            height,
            anchor: Anchor::Right,
        })
    } else {
        let new_height = (width / 2).max(1);
        Some(CropRect {
            x: 0,
            y: height - new_height,
            width,
            height: new_height,
            anchor: Anchor::Bottom,
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}_temp.png", stem))
}

fn crop_in_place(path: &Path) -> Result<AspectOutcome> {
    let img = image::open(path).map_err(|e| Error::Image(e.to_string()))?;
    let (width, height) = img.dimensions();

    let Some(rect) = crop_plan(width, height) else {
        let ratio = width as f64 / height.max(1) as f64;
        info!("✅ Aspect ratio is already correct ({:.2}:1)", ratio);
        return Ok(AspectOutcome::AlreadyCorrect { ratio });
    };

    info!(
        "📐 Adjusting aspect ratio from {:.2}:1 to 2:1",
        width as f64 / height as f64
    );
    let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
    let temp = temp_path(path);
    cropped
        .save_with_format(&temp, ImageFormat::Png)
        .map_err(|e| Error::Image(e.to_string()))?;
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }

    info!("✅ Aspect ratio adjusted to 2:1 ({}x{})", rect.width, rect.height);
    Ok(AspectOutcome::Cropped {
        width: rect.width,
        height: rect.height,
        anchor: rect.anchor,
    })
}

/// Crops the image at `path` to 2:1 in place. Never fails: on any error the
/// file is left untouched and a warning is logged.
pub fn ensure_aspect_ratio(path: impl AsRef<Path>) -> AspectOutcome {
    let path = path.as_ref();
    info!("🔄 Checking and adjusting aspect ratio...");
    match crop_in_place(path) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("⚠️  Could not adjust aspect ratio: {}", e);
            AspectOutcome::Skipped(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_tolerance_is_noop() {
        assert_eq!(crop_plan(2000, 1000), None);
        assert_eq!(crop_plan(2100, 1000), None);
        assert_eq!(crop_plan(1900, 1000), None);
    }

    #[test]
    fn test_too_wide_keeps_right_edge() {
        let rect = crop_plan(1600, 600).unwrap();
        assert_eq!(
            rect,
            CropRect { x: 400, y: 0, width: 1200, height: 600, anchor: Anchor::Right }
        );
        assert_eq!(rect.x + rect.width, 1600);
    }

    #[test]
    fn test_too_tall_keeps_bottom_edge() {
        let rect = crop_plan(1024, 1024).unwrap();
        assert_eq!(
            rect,
            CropRect { x: 0, y: 512, width: 1024, height: 512, anchor: Anchor::Bottom }
        );
        assert_eq!(rect.y + rect.height, 1024);
    }

    #[test]
    fn test_16_by_9_is_cropped_from_the_top() {
        let rect = crop_plan(1920, 1080).unwrap();
        assert_eq!((rect.width, rect.height, rect.y), (1920, 960, 120));
    }

    #[test]
    fn test_plan_is_idempotent() {
        for (w, h) in [(1600, 600), (1024, 1024), (1920, 1080), (1344, 768), (3000, 1001)] {
            let rect = crop_plan(w, h).unwrap();
            assert_eq!(crop_plan(rect.width, rect.height), None, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(crop_plan(0, 10), None);
        assert_eq!(crop_plan(10, 0), None);
    }

    #[test]
    fn test_temp_path_sits_next_to_original() {
        let temp = temp_path(Path::new("/tmp/blog/post.png"));
        assert_eq!(temp, PathBuf::from("/tmp/blog/post_temp.png"));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").unwrap();

        let outcome = ensure_aspect_ratio(&path);
        assert!(matches!(outcome, AspectOutcome::Skipped(_)));
        assert_eq!(fs::read(&path).unwrap(), b"not an image");
    }
}
