//! Component discovery in uploaded source files.
//!
//! Stylesheets are scanned for component-like class names, scripts for
//! capitalized declarations, and JSON for a `components` array or
//! capitalized top-level keys.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::design::ComponentReference;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const CLASS_PREFIXES: &[&str] = &[
    "btn", "card", "modal", "input", "select", "dropdown", "nav", "menu", "alert", "badge", "chip",
    "tab", "accordion", "form", "table", "list",
];

static CSS_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([a-zA-Z][a-zA-Z0-9_-]*)").expect("css class regex"));

static JS_DECLARATIONS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:function|const|let|var)\s+([A-Z][a-zA-Z0-9]*)\s*[=(]").expect("declaration regex"),
        Regex::new(r"class\s+([A-Z][a-zA-Z0-9]*)").expect("class regex"),
        Regex::new(r"export\s+(?:default\s+)?(?:function|const|class)\s+([A-Z][a-zA-Z0-9]*)")
            .expect("export regex"),
    ]
});

/// One component found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl ParsedComponent {
    fn new(name: impl Into<String>, kind: &str, url: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.to_string(), url: url.into() }
    }
}

impl From<ParsedComponent> for ComponentReference {
    fn from(c: ParsedComponent) -> Self {
        ComponentReference::new(c.name, c.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Stylesheet,
    Script,
    Json,
}

impl SourceKind {
    fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "css" | "scss" | "less" => Some(Self::Stylesheet),
            "js" | "jsx" | "ts" | "tsx" => Some(Self::Script),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Extract components from `content`, picking the strategy by file extension.
///
/// Unknown extensions yield nothing. Results are unique by name and keep
/// first-seen order.
pub fn parse_code_file(content: &str, filename: &str) -> Vec<ParsedComponent> {
    let found = match SourceKind::from_filename(filename) {
        Some(SourceKind::Stylesheet) => parse_stylesheet(content),
        Some(SourceKind::Script) => parse_script(content),
        Some(SourceKind::Json) => parse_json(content),
        None => Vec::new(),
    };

    let mut unique: Vec<ParsedComponent> = Vec::with_capacity(found.len());
    for component in found {
        if !unique.iter().any(|c| c.name == component.name) {
            unique.push(component);
        }
    }
    debug!(filename, components = unique.len(), "Parsed code file");
    unique
}

fn is_component_class(class: &str) -> bool {
    let lower = class.to_ascii_lowercase();
    CLASS_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// `btn-primary` becomes `Btn Primary`.
fn format_class_name(class: &str) -> String {
    class
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_stylesheet(content: &str) -> Vec<ParsedComponent> {
    CSS_CLASS
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|class| is_component_class(class))
        .map(|class| ParsedComponent::new(format_class_name(class), "CSS Component", ""))
        .collect()
}

fn parse_script(content: &str) -> Vec<ParsedComponent> {
    JS_DECLARATIONS
        .iter()
        .flat_map(|re| re.captures_iter(content))
        .filter_map(|cap| cap.get(1))
        .map(|m| ParsedComponent::new(m.as_str(), "React Component", ""))
        .collect()
}

fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn parse_json(content: &str) -> Vec<ParsedComponent> {
    let data: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Uploaded JSON is not valid");
            return Vec::new();
        }
    };

    if let Some(list) = data.get("components").and_then(Value::as_array) {
        return list
            .iter()
            .map(|c| {
                let name = string_field(c, "name").or_else(|| string_field(c, "id")).unwrap_or("Unknown");
                ParsedComponent::new(
                    name,
                    string_field(c, "type").unwrap_or("Component"),
                    string_field(c, "url").unwrap_or(""),
                )
            })
            .collect();
    }

    match data.as_object() {
        Some(map) => map
            .keys()
            .filter(|k| k.starts_with(|c: char| c.is_ascii_uppercase()))
            .map(|k| ParsedComponent::new(k.as_str(), "JSON Component", ""))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(components: &[ParsedComponent]) -> Vec<&str> {
        components.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_stylesheet_component_classes() {
        let css = r#"
            .btn-primary { color: red; }
            .btn-primary:hover { color: blue; }
            .card, .Card-header { padding: 1.5rem; }
            .hero { margin: 0; }
            .nav_bar > .menu-item { display: flex; }
        "#;
        let found = parse_code_file(css, "theme.SCSS");
        assert_eq!(names(&found), vec!["Btn Primary", "Card", "Card Header", "Nav_bar", "Menu Item"]);
        assert!(found.iter().all(|c| c.kind == "CSS Component" && c.url.is_empty()));
    }

    #[test]
    fn test_script_declarations() {
        let js = r#"
            export default function PricingCard(props) { return null; }
            const Header = () => null;
            let helper = 1;
            class Modal extends Component {}
            export const Footer = () => null;
        "#;
        let found = parse_code_file(js, "components.tsx");
        let found_names = names(&found);
        for expected in ["PricingCard", "Header", "Modal", "Footer"] {
            assert!(found_names.contains(&expected), "missing {expected}");
        }
        assert!(!found_names.contains(&"helper"));
        assert_eq!(found_names.iter().filter(|n| **n == "PricingCard").count(), 1);
    }

    #[test]
    fn test_json_components_array() {
        let json = r#"{"components":[{"name":"Button","type":"atom","url":"https://ds.example.com/button"},{"id":"card"},{}]}"#;
        let found = parse_code_file(json, "tokens.json");
        assert_eq!(found[0], ParsedComponent::new("Button", "atom", "https://ds.example.com/button"));
        assert_eq!(found[1], ParsedComponent::new("card", "Component", ""));
        assert_eq!(found[2].name, "Unknown");
    }

    #[test]
    fn test_json_capitalized_keys() {
        let found = parse_code_file(r#"{"Button":{},"Card":{},"version":"1"}"#, "ds.json");
        assert_eq!(names(&found), vec!["Button", "Card"]);
        assert!(parse_code_file("{not json", "ds.json").is_empty());
    }

    #[test]
    fn test_unknown_extension_yields_nothing() {
        assert!(parse_code_file(".btn { }", "styles.txt").is_empty());
        assert!(parse_code_file(".btn { }", "Makefile").is_empty());
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let json = serde_json::to_value(ParsedComponent::new("Card", "CSS Component", "")).unwrap();
        assert_eq!(json["type"], "CSS Component");
    }
}
