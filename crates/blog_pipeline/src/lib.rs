//! Hero-image generation for a single blog post.
//!
//! Every stage takes its collaborators explicitly. Only prompt composition,
//! the base image, writing the asset, WebP conversion and the frontmatter
//! update can fail a run; the remaining stages degrade to a fixed fallback.

pub mod composer;
pub mod decode;
pub mod generator;
pub mod logo;
pub mod pipeline;
pub mod prompts;
pub mod quality;
pub mod selector;
pub mod variator;

pub use composer::{compose_enhanced_prompt, compose_prompt};
pub use decode::{decode_json, strip_code_fences};
pub use generator::{generate_candidates, generate_image};
pub use logo::overlay_logo;
pub use pipeline::{
    prompt_path, save_prompt_file, ImagePipeline, PipelineReport, PipelineSettings,
    DEFAULT_IMAGES_DIR, DEFAULT_LOGO_PATH,
};
pub use quality::evaluate_quality;
pub use selector::{select_best, Selection};
pub use variator::{fallback_variations, generate_variations};

pub mod prelude {
    pub use super::{ImagePipeline, PipelineReport, PipelineSettings};
    pub use blog_core::{Error, Result};
}
