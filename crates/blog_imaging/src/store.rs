use std::fs;
use std::path::Path;

use blog_core::{Error, Result};
use image::ImageFormat;
use tracing::debug;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn looks_like_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Persists collaborator output as a PNG, creating the parent directory.
/// Non-PNG payloads that decode are transcoded; anything else is rejected.
pub fn write_png(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if bytes.is_empty() {
        return Err(Error::Image("refusing to write an empty image".to_string()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    if looks_like_png(bytes) {
        fs::write(path, bytes)?;
    } else {
        debug!("Transcoding {} non-PNG bytes to PNG", bytes.len());
        let img = image::load_from_memory(bytes).map_err(|e| Error::Image(e.to_string()))?;
        img.save_with_format(path, ImageFormat::Png)
            .map_err(|e| Error::Image(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([10, 20, 30])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_png_bytes_are_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/blog/post.png");
        let png = encode(ImageFormat::Png);

        write_png(&path, &png).unwrap();
        assert_eq!(fs::read(&path).unwrap(), png);
    }

    #[test]
    fn test_jpeg_bytes_are_transcoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.png");

        write_png(&path, &encode(ImageFormat::Jpeg)).unwrap();
        assert!(looks_like_png(&fs::read(&path).unwrap()));
    }

    #[test]
    fn test_garbage_and_empty_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.png");
        assert!(write_png(&path, b"").is_err());
        assert!(write_png(&path, b"definitely not an image").is_err());
        assert!(!path.exists());
    }
}
