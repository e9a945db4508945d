use blog_core::{ChatMessage, ChatModel, ChatRequest, Error, Result};
use tracing::{info, warn};

use crate::decode::decode_json;
use crate::prompts::{excerpt, VARIATION_PROMPT};
use crate::PipelineSettings;

pub const VARIATION_COUNT: usize = 3;

/// Variants used whenever the collaborator cannot provide three of its own.
pub fn fallback_variations(base: &str) -> Vec<String> {
    vec![
        base.to_string(),
        format!("{} Professional business style.", base),
        format!("{} Modern illustrative approach.", base),
    ]
}

/// Asks for three stylistic takes on `base`. Always returns exactly three
/// prompts.
pub async fn generate_variations(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    base: &str,
    body: &str,
) -> Vec<String> {
    match request_variations(chat, settings, base, body).await {
        Ok(variations) => variations,
        Err(e) => {
            warn!("⚠️ Prompt variation generation failed: {}", e);
            fallback_variations(base)
        }
    }
}

async fn request_variations(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    base: &str,
    body: &str,
) -> Result<Vec<String>> {
    let user = format!("Base prompt: {}\n\nBlog content: {}", base, excerpt(body, 500));
    let request = ChatRequest::new(
        &settings.text_model,
        vec![ChatMessage::system(VARIATION_PROMPT), ChatMessage::user(user)],
    )
    .with_temperature(0.8);

    let completion = chat.complete(&request).await?;
    let decoded: Vec<String> = decode_json(&completion)?;
    let variations: Vec<String> = decoded
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .take(VARIATION_COUNT)
        .collect();

    if variations.len() < VARIATION_COUNT {
        return Err(Error::Decode(format!(
            "expected {} prompt variations, got {}",
            VARIATION_COUNT,
            variations.len()
        )));
    }
    info!("✅ Generated {} prompt variations", variations.len());
    Ok(variations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::Role;
    use blog_inference::models::DummyChatModel;

    async fn run(reply: &str) -> Vec<String> {
        let chat = DummyChatModel::replying(reply);
        generate_variations(&chat, &PipelineSettings::default(), "base", "body").await
    }

    #[tokio::test]
    async fn test_well_formed_reply() {
        let variations = run("```json\n[\"one\", \"two\", \"three\"]\n```").await;
        assert_eq!(variations, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_extra_variations_are_dropped() {
        let variations = run(r#"["a", "b", "c", "d"]"#).await;
        assert_eq!(variations, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_short_or_malformed_replies_fall_back() {
        let expected = fallback_variations("base");
        assert_eq!(run(r#"["only one"]"#).await, expected);
        assert_eq!(run(r#"["a", "", "  "]"#).await, expected);
        assert_eq!(run("Here you go: three prompts").await, expected);
        assert_eq!(run(r#"{"prompts": ["a", "b", "c"]}"#).await, expected);
    }

    #[tokio::test]
    async fn test_collaborator_failure_falls_back() {
        let chat = DummyChatModel::failing("timeout");
        let variations = generate_variations(&chat, &PipelineSettings::default(), "base", "body").await;
        assert_eq!(
            variations,
            vec!["base", "base Professional business style.", "base Modern illustrative approach."]
        );
    }

    #[tokio::test]
    async fn test_request_carries_excerpt() {
        let chat = DummyChatModel::replying(r#"["a", "b", "c"]"#);
        let body = "x".repeat(800);
        generate_variations(&chat, &PipelineSettings::default(), "base", &body).await;

        let user = chat.requests()[0].text_for(Role::User);
        assert_eq!(user, format!("Base prompt: base\n\nBlog content: {}...", "x".repeat(500)));
        assert_eq!(chat.requests()[0].temperature, Some(0.8));
    }
}
