pub mod document;
pub mod frontmatter;
pub mod library;
pub mod updater;

pub use document::{load_document, parse_document};
pub use library::{list_post_paths, load_posts, parse_post_date};
pub use updater::{ensure_updatable, public_image_path, rewrite_png_references, update_image, PUBLIC_IMAGE_PREFIX};

pub mod prelude {
    pub use super::{load_document, load_posts, update_image};
    pub use blog_core::{BlogDocument, BlogPost, Error, Result};
}
