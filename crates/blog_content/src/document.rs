use std::fs;
use std::path::Path;

use blog_core::{BlogDocument, Error, Result};

use crate::frontmatter;

/// Reads a post and splits its frontmatter from the body.
pub fn load_document(path: impl AsRef<Path>) -> Result<BlogDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::FileRead(format!("{}: {}", path.display(), e)))?;
    Ok(parse_document(path, &text))
}

pub fn parse_document(path: impl AsRef<Path>, text: &str) -> BlogDocument {
    let (frontmatter, body) = frontmatter::parse(text);
    BlogDocument {
        path: path.as_ref().to_path_buf(),
        frontmatter,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_document() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        write!(file, "---\ntitle: Test Post\n---\nSome body text").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.frontmatter.get("title"), Some("Test Post"));
        assert_eq!(doc.body, "Some body text");
        assert_eq!(doc.path, file.path());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_document("/definitely/not/here.md").unwrap_err();
        assert!(matches!(err, Error::FileRead(_)));
        assert!(err.to_string().starts_with("Failed to read blog file"));
    }
}
