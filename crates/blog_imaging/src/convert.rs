use std::fs;
use std::path::{Path, PathBuf};

use blog_core::{Error, Result};
use image::DynamicImage;
use tracing::info;

pub const WEBP_QUALITY: f32 = 85.0;
/// libwebp's default effort, used when publishing a single post image.
pub const WEBP_METHOD: i32 = 4;
/// Slowest and smallest setting, used by the batch optimizer.
pub const WEBP_BATCH_METHOD: i32 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_bytes: u64,
    pub converted_bytes: u64,
}

impl ConversionReport {
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.converted_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

/// Lossy WebP encoding of any decoded image. `method` is the libwebp
/// compression effort, 0 (fast) to 6 (smallest).
pub fn encode_webp(img: &DynamicImage, quality: f32, method: i32) -> Result<Vec<u8>> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| Error::Conversion("could not initialise the WebP encoder".to_string()))?;
    config.lossless = 0;
    config.quality = quality;
    config.method = method;

    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| Error::Conversion(format!("{}x{} image: {:?}", rgba.width(), rgba.height(), e)))?;
    Ok(encoded.to_vec())
}

/// Writes `<stem>.webp` next to `path` at the fixed publishing quality.
pub fn convert_to_webp(path: impl AsRef<Path>) -> Result<ConversionReport> {
    convert_to_webp_with_method(path, WEBP_METHOD)
}

pub fn convert_to_webp_with_method(path: impl AsRef<Path>, method: i32) -> Result<ConversionReport> {
    let path = path.as_ref();
    info!("🔄 Converting to WebP format...");

    let img = image::open(path).map_err(|e| Error::Conversion(format!("{}: {}", path.display(), e)))?;
    let encoded = encode_webp(&img, WEBP_QUALITY, method).map_err(|e| match e {
        Error::Conversion(msg) => Error::Conversion(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    if encoded.is_empty() {
        return Err(Error::Conversion(format!("{}: encoder produced no data", path.display())));
    }

    let output = path.with_extension("webp");
    fs::write(&output, &encoded).map_err(|e| Error::Conversion(format!("{}: {}", output.display(), e)))?;

    let report = ConversionReport {
        source: path.to_path_buf(),
        original_bytes: fs::metadata(path)?.len(),
        converted_bytes: encoded.len() as u64,
        output,
    };
    info!("✅ WebP conversion complete - {:.1}% size reduction", report.savings_percent());
    info!("   PNG: {:.2} KB", report.original_bytes as f64 / 1024.0);
    info!("   WebP: {:.2} KB", report.converted_bytes as f64 / 1024.0);
    Ok(report)
}
