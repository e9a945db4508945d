use std::fmt;

use blog_core::{Error, Result};
use url::Url;

pub mod models;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEXT_MODEL: &str = "gpt-4";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Credentials and endpoints for the collaborators, resolved once per run.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub gemini_api_key: String,
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub image_model: String,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Both API keys are required and
    /// must be non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{} environment variable is required", key)))
        };

        let config = Self {
            openai_api_key: required(OPENAI_API_KEY)?,
            gemini_api_key: required(GEMINI_API_KEY)?,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            text_model: get("OPENAI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: get("OPENAI_VISION_MODEL").unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            image_model: get("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        };

        for base in [&config.openai_base_url, &config.gemini_base_url] {
            Url::parse(base).map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base, e)))?;
        }
        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::{create_chat_model, create_image_model};
    pub use blog_core::{ChatModel, Error, ImageModel, Result};
}

pub use models::{create_chat_model, create_image_model};
