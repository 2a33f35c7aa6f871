//! Component references from `get_components` tool results.

use std::sync::LazyLock;

use dzhr_core::design::ComponentReference;
use regex::Regex;
use serde_json::Value;

static COMPONENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Component|component):\s*([^\n,]+)").expect("component line regex"));

pub fn file_url(file_key: &str) -> String {
    format!("https://figma.com/file/{}", file_key)
}

fn reference(item: &Value, default_url: &str) -> Option<ComponentReference> {
    let name = item.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let url = item
        .get("figma_url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .unwrap_or(default_url);
    Some(ComponentReference::new(name, url))
}

/// Arrays of components, `{components: [...]}` objects and single named
/// objects are all accepted.
fn from_data(data: &Value, default_url: &str, out: &mut Vec<ComponentReference>) {
    if let Some(items) = data.as_array() {
        out.extend(items.iter().filter_map(|item| reference(item, default_url)));
    } else if let Some(items) = data.get("components").and_then(Value::as_array) {
        out.extend(items.iter().filter_map(|item| reference(item, default_url)));
    } else if let Some(single) = reference(data, default_url) {
        out.push(single);
    }
}

/// Collect component references from an MCP `tools/call` result.
///
/// JSON content items are read structurally. Text items are parsed as JSON
/// when possible, otherwise scanned for `Component: <name>` lines.
pub fn extract_components(result: &Value, file_key: &str) -> Vec<ComponentReference> {
    let default_url = file_url(file_key);
    let items: Vec<&Value> = match result.get("content") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => return Vec::new(),
    };

    let mut components = Vec::new();
    for item in items {
        match item.get("type").and_then(Value::as_str) {
            Some("json") | Some("application/json") => {
                if let Some(data) = item.get("json").or_else(|| item.get("data")) {
                    from_data(data, &default_url, &mut components);
                }
            }
            Some("text") => {
                let Some(text) = item.get("text").and_then(Value::as_str) else {
                    continue;
                };
                match serde_json::from_str::<Value>(text) {
                    Ok(data) => from_data(&data, &default_url, &mut components),
                    Err(_) => components.extend(
                        COMPONENT_LINE
                            .captures_iter(text)
                            .map(|cap| cap[1].trim().to_string())
                            .filter(|name| !name.is_empty())
                            .map(|name| ComponentReference::new(name, default_url.clone())),
                    ),
                }
            }
            _ => {}
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(refs: &[ComponentReference]) -> Vec<&str> {
        refs.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_text_lines() {
        let result = json!({"content":[{"type":"text","text":"Component: Button\ncomponent: Card, extra\nnothing here"}]});
        let refs = extract_components(&result, "KEY");
        assert_eq!(names(&refs), vec!["Button", "Card"]);
        assert_eq!(refs[0].url, "https://figma.com/file/KEY");
    }

    #[test]
    fn test_json_text_and_structured_items() {
        let result = json!({"content":[
            {"type":"text","text":"{\"components\":[{\"name\":\"Modal\",\"figma_url\":\"https://figma.com/file/KEY?node-id=1\"},{\"id\":\"no-name\"}]}"},
            {"type":"json","json":[{"name":"Tabs"}]},
            {"type":"application/json","data":{"name":"Avatar"}},
            {"type":"image","data":"..."}
        ]});
        let refs = extract_components(&result, "KEY");
        assert_eq!(names(&refs), vec!["Modal", "Tabs", "Avatar"]);
        assert_eq!(refs[0].url, "https://figma.com/file/KEY?node-id=1");
        assert_eq!(refs[1].url, "https://figma.com/file/KEY");
    }

    #[test]
    fn test_single_content_object_and_missing_content() {
        let single = json!({"content":{"type":"text","text":"Component: Chip"}});
        assert_eq!(names(&extract_components(&single, "K")), vec!["Chip"]);
        assert!(extract_components(&json!({"isError": true}), "K").is_empty());
    }
}
