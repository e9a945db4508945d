pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::{first_inline_data, ChatMessage, ChatModel, ChatRequest, ImageModel, Part, Role, PNG_MIME};
pub use types::{
    BlogDocument, BlogPost, Frontmatter, ImageCandidate, ImageScores, QualityVerdict,
    SelectionVerdict, DEFAULT_POST_IMAGE,
};

pub mod prelude {
    pub use super::{BlogDocument, BlogPost, ChatModel, Error, ImageModel, Part, Result};
}
