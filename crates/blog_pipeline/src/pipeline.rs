use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blog_content::{ensure_updatable, load_document, public_image_path, update_image};
use blog_core::{
    BlogPost, ChatModel, ImageCandidate, ImageModel, QualityVerdict, Result, SelectionVerdict,
};
use blog_imaging::{convert_to_webp, ensure_aspect_ratio, write_png, AspectOutcome, ConversionReport};
use tracing::{error, info, warn};

use crate::composer::{compose_enhanced_prompt, compose_prompt};
use crate::generator::{generate_candidates, generate_image};
use crate::logo::overlay_logo;
use crate::quality::evaluate_quality;
use crate::selector::select_best;
use crate::variator::generate_variations;

pub const DEFAULT_IMAGES_DIR: &str = "public/images/blog";
pub const DEFAULT_LOGO_PATH: &str = "public/images/ai-blog-engine-logo.png";

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub text_model: String,
    pub vision_model: String,
    /// Where `<stem>.png` and `<stem>.webp` are written.
    pub images_dir: PathBuf,
    pub logo_path: PathBuf,
    pub with_logo: bool,
    /// Run the advisory quality review on the final image.
    pub review: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            text_model: "gpt-4".to_string(),
            vision_model: "gpt-4o".to_string(),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            with_logo: false,
            review: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub markdown_path: PathBuf,
    pub png_path: PathBuf,
    pub webp_path: PathBuf,
    /// Value written to the post's `image:` field.
    pub public_image: String,
    pub prompt: String,
    pub selection: Option<SelectionVerdict>,
    pub aspect: AspectOutcome,
    pub conversion: ConversionReport,
    pub quality: Option<QualityVerdict>,
}

/// `post.md` → `post.prompt`.
pub fn prompt_path(markdown_path: &Path) -> PathBuf {
    markdown_path.with_extension("prompt")
}

pub fn save_prompt_file(markdown_path: &Path, prompt: &str) -> Result<PathBuf> {
    let path = prompt_path(markdown_path);
    fs::write(&path, prompt)?;
    info!("💾 Prompt saved to: {}", path.display());
    Ok(path)
}

#[derive(Debug, Clone)]
pub struct ImagePipeline {
    chat: Arc<dyn ChatModel>,
    images: Arc<dyn ImageModel>,
    settings: PipelineSettings,
}

impl ImagePipeline {
    pub fn new(chat: Arc<dyn ChatModel>, images: Arc<dyn ImageModel>, settings: PipelineSettings) -> Self {
        Self { chat, images, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Produces and publishes the hero image for one post.
    pub async fn run(&self, markdown_path: impl AsRef<Path>) -> Result<PipelineReport> {
        let markdown_path = markdown_path.as_ref();
        let chat = self.chat.as_ref();
        let images = self.images.as_ref();
        info!("🚀 Starting blog image generation workflow...");

        info!("📖 Reading blog content...");
        let doc = load_document(markdown_path)?;
        ensure_updatable(markdown_path)?;
        let post = BlogPost::from_document(&doc);
        info!("✅ Loaded: {}", post.title);

        let prompt = compose_prompt(chat, &self.settings, &doc.body).await?;
        info!("📝 Generated prompt: {}", crate::prompts::excerpt(&prompt, 100));

        info!("🎨 Generating base image...");
        let base_image = generate_image(images, &prompt, None).await?;

        let variations = generate_variations(chat, &self.settings, &prompt, &doc.body).await;
        let candidates = match generate_candidates(images, &variations).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("⚠️ Multiple image generation failed: {}", e);
                vec![ImageCandidate {
                    index: 1,
                    prompt: prompt.clone(),
                    data: base_image,
                }]
            }
        };

        let selection = select_best(chat, &self.settings, candidates, &doc.body).await?;
        let mut final_image = selection.candidate.data;
        if self.settings.with_logo {
            final_image = overlay_logo(images, final_image, &self.settings.logo_path).await;
        }

        let png_path = self.settings.images_dir.join(format!("{}.png", doc.slug()));
        write_png(&png_path, &final_image)?;
        info!("📁 Image saved to: {}", png_path.display());

        let aspect = ensure_aspect_ratio(&png_path);
        let conversion = convert_to_webp(&png_path)?;

        let quality = if self.settings.review {
            let published = fs::read(&png_path).unwrap_or(final_image);
            let verdict = evaluate_quality(chat, &self.settings, &published, &doc.body).await;
            if !verdict.approved {
                warn!("⚠️ Image was rejected by review, publishing anyway");
                let enhanced = compose_enhanced_prompt(chat, &self.settings, &doc.body, &verdict.suggestions).await;
                if let Err(e) = save_prompt_file(markdown_path, &enhanced) {
                    warn!("⚠️ Could not save enhanced prompt: {}", e);
                }
            }
            Some(verdict)
        } else {
            None
        };

        info!("📝 Updating markdown file with new image path...");
        let public_image = public_image_path(&conversion.output);
        update_image(markdown_path, &public_image)?;

        info!("✨ Blog image generation workflow completed!");
        info!("📊 Generated files:");
        info!("   PNG: {}", png_path.display());
        info!("   WebP: {}", conversion.output.display());
        info!("   Updated: {}", markdown_path.display());

        Ok(PipelineReport {
            markdown_path: markdown_path.to_path_buf(),
            webp_path: conversion.output.clone(),
            png_path,
            public_image,
            prompt,
            selection: selection.verdict,
            aspect,
            conversion,
            quality,
        })
    }

    /// Re-composes the prompt for a failed run and saves it next to the post
    /// for manual use.
    pub async fn recover_prompt(&self, markdown_path: impl AsRef<Path>) -> Result<PathBuf> {
        let markdown_path = markdown_path.as_ref();
        let doc = load_document(markdown_path)?;
        let prompt = compose_prompt(self.chat.as_ref(), &self.settings, &doc.body).await?;
        save_prompt_file(markdown_path, &prompt)
    }

    /// Like [`run`](Self::run), but a failure first attempts
    /// [`recover_prompt`](Self::recover_prompt). The original error is
    /// always the one returned.
    pub async fn run_with_recovery(&self, markdown_path: impl AsRef<Path>) -> Result<PipelineReport> {
        let markdown_path = markdown_path.as_ref();
        match self.run(markdown_path).await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("❌ Error: {}", e);
                if let Err(save_error) = self.recover_prompt(markdown_path).await {
                    error!("❌ Failed to save prompt: {}", save_error);
                }
                Err(e)
            }
        }
    }
}
