use std::fs;
use std::path::{Path, PathBuf};

use blog_core::Result;
use tracing::{error, info};

use crate::convert::{convert_to_webp_with_method, ConversionReport, WEBP_BATCH_METHOD};

#[derive(Debug, Default)]
pub struct OptimizeSummary {
    pub converted: Vec<ConversionReport>,
    pub failed: Vec<(PathBuf, String)>,
}

impl OptimizeSummary {
    pub fn original_bytes(&self) -> u64 {
        self.converted.iter().map(|r| r.original_bytes).sum()
    }

    pub fn converted_bytes(&self) -> u64 {
        self.converted.iter().map(|r| r.converted_bytes).sum()
    }

    pub fn savings_percent(&self) -> f64 {
        let original = self.original_bytes();
        if original == 0 {
            return 0.0;
        }
        (1.0 - self.converted_bytes() as f64 / original as f64) * 100.0
    }
}

/// PNG files in `dir` that do not have a `.webp` sibling yet.
pub fn pending_conversions(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut pending = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_png = path.extension().map_or(false, |ext| ext == "png");
        if is_png && path.is_file() && !path.with_extension("webp").exists() {
            pending.push(path);
        }
    }
    pending.sort();
    Ok(pending)
}

/// Converts every pending PNG in `dir`. A failing file is recorded and the
/// batch moves on.
pub fn optimize_directory(dir: impl AsRef<Path>) -> Result<OptimizeSummary> {
    info!("🎨 Starting blog image optimization...");
    let pending = pending_conversions(dir)?;
    let mut summary = OptimizeSummary::default();

    if pending.is_empty() {
        info!("✅ All PNG files already have WebP versions");
        return Ok(summary);
    }

    info!("📁 Found {} new PNG files to optimize", pending.len());
    for path in pending {
        match convert_to_webp_with_method(&path, WEBP_BATCH_METHOD) {
            Ok(report) => {
                info!(
                    "✅ {} → {} ({:.1}% savings)",
                    path.display(),
                    report.output.display(),
                    report.savings_percent()
                );
                summary.converted.push(report);
            }
            Err(e) => {
                error!("❌ Error processing {}: {}", path.display(), e);
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    info!("📊 Optimization Summary:");
    info!("   Total original size: {:.1} KB", summary.original_bytes() as f64 / 1024.0);
    info!("   Total optimized size: {:.1} KB", summary.converted_bytes() as f64 / 1024.0);
    info!("   Total savings: {:.1}%", summary.savings_percent());
    Ok(summary)
}
