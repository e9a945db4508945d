use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read blog file: {0}")]
    FileRead(String),

    #[error("Upstream generation error: {0}")]
    Generation(String),

    #[error("No image produced: {0}")]
    NoImage(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Failed to update markdown: {0}")]
    Frontmatter(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("WebP conversion failed: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
