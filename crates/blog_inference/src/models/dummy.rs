//! Scripted collaborators that never touch the network.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use blog_core::{ChatModel, ChatRequest, Error, ImageModel, Part, Result};

type ChatHandler = Box<dyn Fn(&ChatRequest) -> Result<String> + Send + Sync>;
type ImageHandler = Box<dyn Fn(&[Part]) -> Result<Vec<Part>> + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct DummyChatModel {
    handler: ChatHandler,
    requests: Mutex<Vec<ChatRequest>>,
}

impl DummyChatModel {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with the same text.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Fails every request.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(Error::Generation(message.clone())))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl fmt::Debug for DummyChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyChatModel")
            .field("calls", &self.call_count())
            .finish()
    }
}

#[async_trait::async_trait]
impl ChatModel for DummyChatModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        lock(&self.requests).push(request.clone());
        (self.handler)(request)
    }
}

pub struct DummyImageModel {
    handler: ImageHandler,
    calls: Mutex<Vec<Vec<Part>>>,
}

impl DummyImageModel {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[Part]) -> Result<Vec<Part>> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request with a text part followed by `image`.
    pub fn returning_image(image: Vec<u8>) -> Self {
        Self::new(move |_| Ok(vec![Part::text("Generated image"), Part::png(image.clone())]))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(Error::Generation(message.clone())))
    }

    pub fn calls(&self) -> Vec<Vec<Part>> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl fmt::Debug for DummyImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyImageModel")
            .field("calls", &self.call_count())
            .finish()
    }
}

#[async_trait::async_trait]
impl ImageModel for DummyImageModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_content(&self, parts: &[Part]) -> Result<Vec<Part>> {
        lock(&self.calls).push(parts.to_vec());
        (self.handler)(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{first_inline_data, ChatMessage};

    #[tokio::test]
    async fn test_dummy_chat_model_records_requests() {
        let model = DummyChatModel::replying("a prompt");
        let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("body")]);

        assert_eq!(model.complete(&request).await.unwrap(), "a prompt");
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.requests()[0].model, "gpt-4");
    }

    #[tokio::test]
    async fn test_dummy_image_model() {
        let model = DummyImageModel::returning_image(vec![7, 7]);
        let parts = model.generate_content(&[Part::text("prompt")]).await.unwrap();
        assert_eq!(first_inline_data(&parts), Some(&[7u8, 7][..]));

        let failing = DummyImageModel::failing("quota");
        assert!(failing.generate_content(&[]).await.is_err());
        assert_eq!(failing.call_count(), 1);
    }
}
