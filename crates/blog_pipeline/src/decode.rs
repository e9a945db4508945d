use blog_core::{Error, Result};
use serde::de::DeserializeOwned;

/// Removes markdown code fences that chat models like to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decodes a JSON payload out of a completion.
pub fn decode_json<T: DeserializeOwned>(completion: &str) -> Result<T> {
    let cleaned = strip_code_fences(completion);
    serde_json::from_str(&cleaned).map_err(|e| Error::Decode(format!("{} in {:?}", e, cleaned)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::SelectionVerdict;

    #[test]
    fn test_fenced_json_decodes() {
        let text = "```json\n[\"a\", \"b\", \"c\"]\n```";
        let prompts: Vec<String> = decode_json(text).unwrap();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_selection_wire_names() {
        let text = r#"{"selectedIndex": 2, "reason": "sharper", "scores": {"image2": {"relevance": 9, "quality": 8, "composition": 7}}}"#;
        let verdict: SelectionVerdict = decode_json(text).unwrap();
        assert_eq!(verdict.selected_index, 2);
        assert_eq!(verdict.scores["image2"].relevance, 9.0);
    }

    #[test]
    fn test_prose_is_a_decode_error() {
        let result: Result<Vec<String>> = decode_json("Sure! Here are three prompts.");
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
