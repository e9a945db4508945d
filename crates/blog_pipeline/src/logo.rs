use std::fs;
use std::path::Path;

use blog_core::{ImageModel, Part};
use tracing::{info, warn};

use crate::generator::generate_image_from_parts;
use crate::prompts::LOGO_OVERLAY_PROMPT;

/// Asks the image collaborator to brand `image` with the site logo.
/// Returns `image` unchanged if the logo is unreadable or the call fails.
pub async fn overlay_logo(images: &dyn ImageModel, image: Vec<u8>, logo_path: &Path) -> Vec<u8> {
    info!("🎨 Adding logo overlay with {}...", images.name());
    let logo = match fs::read(logo_path) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => {
            warn!("⚠️ Logo file {} is empty, returning original image", logo_path.display());
            return image;
        }
        Err(e) => {
            warn!("⚠️ Could not load logo {}: {}, returning original image", logo_path.display(), e);
            return image;
        }
    };

    let parts = vec![
        Part::text(LOGO_OVERLAY_PROMPT),
        Part::png(image.clone()),
        Part::png(logo),
    ];
    match generate_image_from_parts(images, &parts).await {
        Ok(branded) => {
            info!("✅ Logo overlay added successfully");
            branded
        }
        Err(e) => {
            warn!("⚠️ Could not add logo overlay: {}", e);
            image
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_inference::models::DummyImageModel;

    fn logo_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("logo.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        path
    }

    #[tokio::test]
    async fn test_branded_image_replaces_original() {
        let dir = tempfile::tempdir().unwrap();
        let images = DummyImageModel::returning_image(vec![42]);

        let out = overlay_logo(&images, vec![1, 2, 3], &logo_file(dir.path())).await;
        assert_eq!(out, vec![42]);

        let call = &images.calls()[0];
        assert_eq!(call.len(), 3);
        assert_eq!(call[0], Part::text(LOGO_OVERLAY_PROMPT));
        assert_eq!(call[1], Part::png(vec![1, 2, 3]));
        assert_eq!(call[2], Part::png(vec![0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn test_failure_returns_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let logo = logo_file(dir.path());

        let failing = DummyImageModel::failing("rate limited");
        assert_eq!(overlay_logo(&failing, vec![1, 2, 3], &logo).await, vec![1, 2, 3]);

        let text_only = DummyImageModel::new(|_| Ok(vec![Part::text("no")]));
        assert_eq!(overlay_logo(&text_only, vec![1, 2, 3], &logo).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_logo_skips_the_call() {
        let dir = tempfile::tempdir().unwrap();
        let images = DummyImageModel::returning_image(vec![42]);

        let out = overlay_logo(&images, vec![5], &dir.path().join("missing.png")).await;
        assert_eq!(out, vec![5]);
        assert_eq!(images.call_count(), 0);
    }
}
