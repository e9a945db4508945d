use std::fs;

use blog_content::{load_document, public_image_path, update_image};
use blog_core::BlogPost;

const POST: &str = "---
title: \"Shipping Faster with Markdown\"
excerpt: \"How we publish: a short tour\"
author: Jane Doe
date: 2024-01-15
category: Engineering
readTime: 4 min read
image: /images/blog/old.png
---

# Shipping Faster

Body text that mentions image: /images/blog/old.png inline.
";

#[test]
fn test_update_preserves_everything_but_the_image_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2024-01-15-post.md");
    fs::write(&path, POST).unwrap();

    let asset = dir.path().join("images").join("2024-01-15-post.webp");
    let image = public_image_path(&asset);
    update_image(&path, &image).unwrap();

    let before: Vec<&str> = POST.lines().collect();
    let text = fs::read_to_string(&path).unwrap();
    let after: Vec<&str> = text.lines().collect();
    assert_eq!(before.len(), after.len());

    let changed: Vec<(usize, &str)> = after
        .iter()
        .enumerate()
        .filter(|(i, line)| before[*i] != **line)
        .map(|(i, line)| (i, *line))
        .collect();
    assert_eq!(changed, vec![(7, "image: /images/blog/2024-01-15-post.webp")]);
    assert!(text.ends_with("inline.\n"));
}

#[test]
fn test_updated_post_reads_back_with_new_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2024-01-15-post.md");
    fs::write(&path, POST).unwrap();

    update_image(&path, "/images/blog/2024-01-15-post.webp").unwrap();

    let post = BlogPost::from_document(&load_document(&path).unwrap());
    assert_eq!(post.image, "/images/blog/2024-01-15-post.webp");
    assert_eq!(post.title, "Shipping Faster with Markdown");
    assert_eq!(post.excerpt, "How we publish: a short tour");
    assert_eq!(post.read_time, "4 min read");
}

#[test]
fn test_update_without_frontmatter_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.md");
    fs::write(&path, "# No metadata\n").unwrap();

    assert!(update_image(&path, "/images/blog/bare.webp").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "# No metadata\n");
}
