//! Parsing of the generator's `{html, css}` answer.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{DzhrError, DzhrResult};

/// The two fields a generation answer must carry. Missing or null fields
/// read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtifactPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub css: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extract a JSON object from text that may be wrapped in a markdown fence
/// or surrounded by prose.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_marker = &trimmed[start + 3..];
        if let Some(end) = after_marker.find("```") {
            return after_marker[..end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Parse a model answer as JSON. The answer is read as-is first; fence and
/// prose stripping only applies when that fails, so markup that itself
/// contains fences survives.
pub fn parse_json_answer<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let trimmed = text.trim();
    serde_json::from_str(trimmed).or_else(|first| {
        let extracted = extract_json(trimmed);
        if extracted == trimmed {
            return Err(first);
        }
        serde_json::from_str(extracted)
    })
}

/// Parse a generation answer. An empty answer is an empty payload; anything
/// that is not a JSON object with string fields is `MalformedResponse`.
pub fn parse_artifact(text: &str) -> DzhrResult<ArtifactPayload> {
    if text.trim().is_empty() {
        return Ok(ArtifactPayload::default());
    }
    parse_json_answer(text).map_err(|e| DzhrError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let payload = parse_artifact(r#"{"html":"<main></main>","css":"main{}"}"#).unwrap();
        assert_eq!(payload.html, "<main></main>");
        assert_eq!(payload.css, "main{}");
    }

    #[test]
    fn test_fenced_and_prose_wrapped() {
        let fenced = "```json\n{\"html\":\"<p>a</p>\",\"css\":\"\"}\n```";
        assert_eq!(parse_artifact(fenced).unwrap().html, "<p>a</p>");

        let prose = "Here you go: {\"html\":\"<p>b</p>\"} Enjoy!";
        let payload = parse_artifact(prose).unwrap();
        assert_eq!(payload.html, "<p>b</p>");
        assert_eq!(payload.css, "");
    }

    #[test]
    fn test_fences_inside_markup_are_kept() {
        let html = "<main><h1>Install</h1><pre><code>```bash\nnpm i dzhr\n```</code></pre></main>";
        let answer = serde_json::json!({ "html": html, "css": "pre { padding: 8px; }" }).to_string();
        let payload = parse_artifact(&answer).unwrap();
        assert_eq!(payload.html, html);
        assert_eq!(payload.css, "pre { padding: 8px; }");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let payload = parse_artifact(r#"{"html": null, "css": "body{}"}"#).unwrap();
        assert_eq!(payload.html, "");
        assert_eq!(payload.css, "body{}");
    }

    #[test]
    fn test_empty_answer_is_empty_payload() {
        assert_eq!(parse_artifact("  ").unwrap(), ArtifactPayload::default());
    }

    #[test]
    fn test_malformed_answer() {
        assert!(matches!(parse_artifact("not json at all"), Err(DzhrError::MalformedResponse(_))));
        assert!(matches!(parse_artifact(r#"{"html": 42}"#), Err(DzhrError::MalformedResponse(_))));
    }
}
