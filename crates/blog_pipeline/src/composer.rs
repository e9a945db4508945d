use blog_core::{ChatMessage, ChatModel, ChatRequest, Error, Result};
use tracing::{info, warn};

use crate::prompts::{REJECTION_NOTICE, SYSTEM_PROMPT};
use crate::PipelineSettings;

/// Turns a post body into a single text-to-image prompt.
pub async fn compose_prompt(chat: &dyn ChatModel, settings: &PipelineSettings, body: &str) -> Result<String> {
    info!("🤖 Generating image prompt with {}...", chat.name());
    let request = ChatRequest::new(
        &settings.text_model,
        vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(body)],
    )
    .with_temperature(0.7);

    let completion = chat
        .complete(&request)
        .await
        .map_err(|e| Error::Generation(format!("{} API error: {}", chat.name(), e)))?;
    let prompt = completion.trim().to_string();
    if prompt.is_empty() {
        return Err(Error::Generation(format!("{} returned an empty prompt", chat.name())));
    }
    info!("✅ Image prompt generated successfully");
    Ok(prompt)
}

/// Re-composes after a rejected image, steering away from `suggestions`.
/// Falls back to the body itself when the collaborator fails.
pub async fn compose_enhanced_prompt(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    body: &str,
    suggestions: &[String],
) -> String {
    info!("🔄 Generating enhanced prompt based on feedback...");
    let system = format!("{}{}{}", SYSTEM_PROMPT, REJECTION_NOTICE, suggestions.join(", "));
    let request = ChatRequest::new(
        &settings.text_model,
        vec![ChatMessage::system(system), ChatMessage::user(body)],
    )
    .with_temperature(0.8);

    match chat.complete(&request).await {
        Ok(completion) => completion.trim().to_string(),
        Err(e) => {
            warn!("⚠️ Enhanced prompt generation failed: {}", e);
            body.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::Role;
    use blog_inference::models::DummyChatModel;

    #[tokio::test]
    async fn test_compose_prompt_trims_and_uses_text_model() {
        let chat = DummyChatModel::replying("  editorial photo of a lighthouse  \n");
        let settings = PipelineSettings::default();

        let prompt = compose_prompt(&chat, &settings, "Post body").await.unwrap();
        assert_eq!(prompt, "editorial photo of a lighthouse");

        let request = &chat.requests()[0];
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.text_for(Role::System), SYSTEM_PROMPT);
        assert_eq!(request.text_for(Role::User), "Post body");
    }

    #[tokio::test]
    async fn test_compose_prompt_failure_is_fatal() {
        let chat = DummyChatModel::failing("quota exceeded");
        let err = compose_prompt(&chat, &PipelineSettings::default(), "body").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_enhanced_prompt_mentions_suggestions() {
        let chat = DummyChatModel::replying("better prompt");
        let suggestions = vec!["less generic".to_string(), "warmer light".to_string()];

        let prompt = compose_enhanced_prompt(&chat, &PipelineSettings::default(), "body", &suggestions).await;
        assert_eq!(prompt, "better prompt");
        let system = chat.requests()[0].text_for(Role::System);
        assert!(system.ends_with("addresses these specific issues: less generic, warmer light"));
        assert_eq!(chat.requests()[0].temperature, Some(0.8));
    }

    #[tokio::test]
    async fn test_enhanced_prompt_falls_back_to_body() {
        let chat = DummyChatModel::failing("down");
        let prompt = compose_enhanced_prompt(&chat, &PipelineSettings::default(), "the body", &[]).await;
        assert_eq!(prompt, "the body");
    }
}
