use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use blog_core::{Error, ImageModel, Part, Result, PNG_MIME};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::truncate_for_log;
use crate::Config;

// Endpoint: POST {base}/models/{model}:generateContent, auth via x-goog-api-key.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: RequestInlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default, alias = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize, Debug)]
struct InlineData {
    #[serde(default, alias = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

fn to_request_part(part: &Part) -> RequestPart {
    match part {
        Part::Text(text) => RequestPart::Text { text: text.clone() },
        Part::InlineData { mime_type, data } => RequestPart::Inline {
            inline_data: RequestInlineData {
                mime_type: mime_type.clone(),
                data: BASE64.encode(data),
            },
        },
    }
}

/// Serialises parts as a single-turn `generateContent` body.
pub fn build_request_body(parts: &[Part]) -> Result<serde_json::Value> {
    let request = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: parts.iter().map(to_request_part).collect(),
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
        },
    };
    Ok(serde_json::to_value(request)?)
}

/// Decodes the parts of the first candidate. Inline payloads arrive base64
/// encoded and are returned as raw bytes.
pub fn parse_response(body: &str) -> Result<Vec<Part>> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or_else(|| Error::NoImage("No image generated by Gemini".to_string()))?;

    let mut parts = Vec::with_capacity(content.parts.len());
    for part in content.parts {
        if let Some(inline) = part.inline_data {
            let data = BASE64
                .decode(inline.data.as_bytes())
                .map_err(|e| Error::Decode(format!("Gemini inline data is not base64: {}", e)))?;
            parts.push(Part::InlineData {
                mime_type: inline.mime_type.unwrap_or_else(|| PNG_MIME.to_string()),
                data,
            });
        } else if let Some(text) = part.text {
            parts.push(Part::Text(text));
        }
    }
    Ok(parts)
}

pub struct GeminiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        if config.gemini_api_key.is_empty() {
            return Err(Error::Config("Gemini API key is required".to_string()));
        }
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.image_model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl ImageModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate_content(&self, parts: &[Part]) -> Result<Vec<Part>> {
        let body = build_request_body(parts)?;
        debug!("Sending generateContent: model={}, parts={}", self.model, parts.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Gemini API error: {}", e)))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Generation(format!(
                "Gemini API error ({}): {}",
                status,
                truncate_for_log(&text, 500)
            )));
        }

        let parts = parse_response(&text)?;
        debug!("Gemini returned {} parts", parts.len());
        Ok(parts)
    }
}
