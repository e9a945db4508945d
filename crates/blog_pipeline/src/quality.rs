use blog_core::{ChatMessage, ChatModel, ChatRequest, Part, QualityVerdict, Result};
use tracing::{info, warn};

use crate::decode::decode_json;
use crate::prompts::{excerpt, QUALITY_PROMPT};
use crate::PipelineSettings;

/// Reviews one image against the post. Any failure approves it.
pub async fn evaluate_quality(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    image: &[u8],
    body: &str,
) -> QualityVerdict {
    info!("🔍 Analyzing image quality with {}...", settings.vision_model);
    match request_verdict(chat, settings, image, body).await {
        Ok(verdict) => {
            info!(
                "📊 Quality assessment: {}",
                if verdict.approved { "APPROVED" } else { "REJECTED" }
            );
            if !verdict.approved {
                info!("❌ Reason: {}", verdict.reason);
                info!("💡 Suggestions: {}", verdict.suggestions.join(", "));
            }
            verdict
        }
        Err(e) => {
            warn!("⚠️ Quality check failed: {}", e);
            QualityVerdict::unavailable()
        }
    }
}

async fn request_verdict(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    image: &[u8],
    body: &str,
) -> Result<QualityVerdict> {
    let parts = vec![
        Part::text(format!("Blog Content: {}", excerpt(body, 1000))),
        Part::png(image),
    ];
    let request = ChatRequest::new(
        &settings.vision_model,
        vec![ChatMessage::system(QUALITY_PROMPT), ChatMessage::user_parts(parts)],
    )
    .with_max_tokens(500);

    let completion = chat.complete(&request).await?;
    decode_json(&completion)
}
