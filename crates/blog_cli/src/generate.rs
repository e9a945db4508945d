use std::path::PathBuf;

use anyhow::{anyhow, Context};
use blog_inference::{create_chat_model, create_image_model, Config};
use blog_pipeline::{ImagePipeline, PipelineReport, PipelineSettings, DEFAULT_IMAGES_DIR, DEFAULT_LOGO_PATH};
use clap::Parser;
use tracing::info;

pub const USAGE: &str = "Usage: generate-blog-image <markdown-file-path> [--with-logo] [--review]";

/// Generate, pick and publish a hero image for a blog post.
#[derive(Parser, Debug)]
#[command(name = "generate-blog-image", author, version, about, long_about = None)]
pub struct GenerateArgs {
    /// Markdown post, e.g. src/content/blog/2024-01-15-my-post.md
    pub markdown: Option<PathBuf>,
    /// Brand the final image with the site logo in the bottom-right corner
    #[arg(long)]
    pub with_logo: bool,
    /// Run an advisory quality review of the published image
    #[arg(long)]
    pub review: bool,
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_LOGO_PATH)]
    pub logo: PathBuf,
}

impl GenerateArgs {
    pub fn settings(&self, config: &Config) -> PipelineSettings {
        PipelineSettings {
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            images_dir: self.images_dir.clone(),
            logo_path: self.logo.clone(),
            with_logo: self.with_logo,
            review: self.review,
        }
    }
}

/// Validates arguments and credentials before building any collaborator,
/// then runs the pipeline.
pub async fn run<F>(args: GenerateArgs, load_config: F) -> anyhow::Result<PipelineReport>
where
    F: FnOnce() -> blog_core::Result<Config>,
{
    let markdown = args
        .markdown
        .clone()
        .ok_or_else(|| anyhow!("Please provide a markdown file path\n{}", USAGE))?;
    let config = load_config()?;

    let chat = create_chat_model(&config)?;
    let images = create_image_model(&config)?;
    info!("🧠 Collaborators ready ({} text, {} images)", chat.name(), images.name());

    let pipeline = ImagePipeline::new(chat, images, args.settings(&config));
    let report = pipeline
        .run_with_recovery(&markdown)
        .await
        .with_context(|| format!("Blog image generation failed for {}", markdown.display()))?;
    Ok(report)
}
