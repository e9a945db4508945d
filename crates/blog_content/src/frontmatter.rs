use blog_core::Frontmatter;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Lenient reader: the closing marker may end the file.
    static ref READ_BLOCK: Regex = Regex::new(r"(?s)\A---\n(.*?)\n---(?:\n|\z)").unwrap();
}

pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Splits normalised text into the frontmatter block and the body after it.
///
/// Returns `None` when the text does not open with a `---` block.
pub fn split(text: &str) -> Option<(&str, &str)> {
    let captures = READ_BLOCK.captures(text)?;
    let block = captures.get(1)?.as_str();
    let end = captures.get(0)?.end();
    Some((block, &text[end..]))
}

/// Parses `key: value` lines. Values keep everything after the first colon,
/// surrounding double quotes are dropped and lines without a key are ignored.
pub fn parse_block(block: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        frontmatter.insert(key, unquote(value.trim()));
    }
    frontmatter
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses a whole file. Text without a frontmatter block becomes all body.
pub fn parse(text: &str) -> (Frontmatter, String) {
    let text = normalize_line_endings(text);
    match split(&text) {
        Some((block, body)) => (parse_block(block), body.to_string()),
        None => (Frontmatter::new(), text),
    }
}
