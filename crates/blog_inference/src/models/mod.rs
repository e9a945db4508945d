use std::sync::Arc;

use blog_core::{ChatModel, ImageModel, Result};

use crate::Config;

pub mod dummy;
pub mod gemini;
pub mod openai;

pub use dummy::{DummyChatModel, DummyImageModel};
pub use gemini::GeminiModel;
pub use openai::OpenAiModel;

/// Text and vision collaborator for the run.
pub fn create_chat_model(config: &Config) -> Result<Arc<dyn ChatModel>> {
    Ok(Arc::new(OpenAiModel::new(config)?))
}

/// Image-generation collaborator for the run.
pub fn create_image_model(config: &Config) -> Result<Arc<dyn ImageModel>> {
    Ok(Arc::new(GeminiModel::new(config)?))
}

pub(crate) fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_models() {
        let config = crate::tests::test_config();
        assert_eq!(create_chat_model(&config).unwrap().name(), "OpenAI");
        assert_eq!(create_image_model(&config).unwrap().name(), "Gemini");
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("ñandú salvaje", 5), "ñandú…");
    }
}
