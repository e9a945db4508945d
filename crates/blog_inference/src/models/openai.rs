use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use blog_core::{ChatMessage, ChatModel, ChatRequest, Error, Part, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::truncate_for_log;
use crate::Config;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: WireContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        let content = match message.parts.as_slice() {
            [Part::Text(text)] => WireContent::Text(text.clone()),
            parts => WireContent::Parts(parts.iter().map(to_wire_part).collect()),
        };
        Self {
            role: message.role.as_str(),
            content,
        }
    }
}

fn to_wire_part(part: &Part) -> WirePart {
    match part {
        Part::Text(text) => WirePart::Text { text: text.clone() },
        Part::InlineData { mime_type, data } => WirePart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", mime_type, BASE64.encode(data)),
            },
        },
    }
}

/// Serialises a request into the chat-completions body.
pub fn build_request_body(request: &ChatRequest) -> Result<serde_json::Value> {
    let body = ChatCompletionRequest {
        model: &request.model,
        messages: request.messages.iter().map(WireMessage::from).collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    };
    Ok(serde_json::to_value(body)?)
}

/// Extracts the first choice's text from a chat-completions response body.
pub fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Generation("OpenAI returned no completion".to_string()))
}

pub struct OpenAiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Result<Self> {
        if config.openai_api_key.is_empty() {
            return Err(Error::Config("OpenAI API key is required".to_string()));
        }
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = build_request_body(request)?;
        debug!(
            "Sending chat completion: model={}, messages={}, images={}",
            request.model,
            request.messages.len(),
            request.image_count()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("OpenAI API error: {}", e)))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Generation(format!(
                "OpenAI API error ({}): {}",
                status,
                truncate_for_log(&text, 500)
            )));
        }
        parse_chat_response(&text)
    }
}
