use blog_core::{
    ChatMessage, ChatModel, ChatRequest, Error, ImageCandidate, Part, Result, SelectionVerdict,
};
use tracing::{info, warn};

use crate::decode::decode_json;
use crate::prompts::{excerpt, SELECTION_PROMPT};
use crate::PipelineSettings;

/// The winning candidate and, when the collaborator was consulted
/// successfully, its verdict.
#[derive(Debug, Clone)]
pub struct Selection {
    pub candidate: ImageCandidate,
    pub verdict: Option<SelectionVerdict>,
}

/// Picks the candidate that best fits the post. Errors only on an empty
/// candidate list; any other problem selects the first candidate.
pub async fn select_best(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    mut candidates: Vec<ImageCandidate>,
    body: &str,
) -> Result<Selection> {
    if candidates.is_empty() {
        return Err(Error::NoImage("no candidates to select from".to_string()));
    }
    if candidates.len() == 1 {
        return Ok(Selection {
            candidate: candidates.remove(0),
            verdict: None,
        });
    }

    info!("🔍 Evaluating {} images to select the best one...", candidates.len());
    match request_selection(chat, settings, &candidates, body).await {
        Ok(verdict) => {
            info!("✅ Selected image {}: {}", verdict.selected_index, verdict.reason);
            let candidate = candidates.swap_remove(verdict.selected_index - 1);
            Ok(Selection {
                candidate,
                verdict: Some(verdict),
            })
        }
        Err(e) => {
            warn!("⚠️ Image selection failed: {}", e);
            info!("🔄 Falling back to first image option");
            Ok(Selection {
                candidate: candidates.remove(0),
                verdict: None,
            })
        }
    }
}

async fn request_selection(
    chat: &dyn ChatModel,
    settings: &PipelineSettings,
    candidates: &[ImageCandidate],
    body: &str,
) -> Result<SelectionVerdict> {
    let mut parts = vec![Part::text(format!(
        "Blog Content: {}\n\nPlease evaluate these {} images and select the best one.",
        excerpt(body, 1000),
        candidates.len()
    ))];
    parts.extend(candidates.iter().map(|c| Part::png(c.data.clone())));

    let request = ChatRequest::new(
        &settings.vision_model,
        vec![ChatMessage::system(SELECTION_PROMPT), ChatMessage::user_parts(parts)],
    )
    .with_max_tokens(500);

    let completion = chat.complete(&request).await?;
    let verdict: SelectionVerdict = decode_json(&completion)?;
    if !(1..=candidates.len()).contains(&verdict.selected_index) {
        return Err(Error::Decode(format!(
            "selected index {} is outside 1..={}",
            verdict.selected_index,
            candidates.len()
        )));
    }
    Ok(verdict)
}
