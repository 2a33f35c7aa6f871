//! Style tokens, component references, constraint bundles and artifacts.

use serde::{Deserialize, Serialize};

/// Colors, fonts, spacing and layout idioms that constrain a generation.
///
/// Order is significant: the first color and first font are treated as primary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTokenSet {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub spacing: Vec<String>,
    #[serde(default)]
    pub layouts: Vec<String>,
}

impl StyleTokenSet {
    /// Build a token set with every list deduplicated, first occurrence kept.
    pub fn new(
        colors: Vec<String>,
        fonts: Vec<String>,
        spacing: Vec<String>,
        layouts: Vec<String>,
    ) -> Self {
        Self {
            colors: dedup_ordered(colors),
            fonts: dedup_ordered(fonts),
            spacing: dedup_ordered(spacing),
            layouts: dedup_ordered(layouts),
        }
    }

    /// Same tokens with duplicates and blank entries removed.
    pub fn normalized(self) -> Self {
        Self::new(self.colors, self.fonts, self.spacing, self.layouts)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.fonts.is_empty()
            && self.spacing.is_empty()
            && self.layouts.is_empty()
    }

    pub fn primary_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    pub fn primary_font(&self) -> Option<&str> {
        self.fonts.first().map(String::as_str)
    }
}

/// Remove duplicates and blank entries while keeping first-seen order.
pub fn dedup_ordered<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() || out.iter().any(|existing| existing == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// One named component of a design system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReference {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl ComponentReference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// Optional constraints passed into prompt composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintBundle {
    pub style_tokens: Option<StyleTokenSet>,
    pub design_system_url: Option<String>,
    pub component_catalog: Vec<ComponentReference>,
}

impl ConstraintBundle {
    pub fn with_style_tokens(mut self, tokens: StyleTokenSet) -> Self {
        self.style_tokens = Some(tokens);
        self
    }

    pub fn with_design_system_url(mut self, url: impl Into<String>) -> Self {
        self.design_system_url = Some(url.into());
        self
    }

    pub fn with_component_catalog(mut self, components: Vec<ComponentReference>) -> Self {
        self.component_catalog = components;
        self
    }

    /// Style tokens that should produce an instruction block, if any.
    pub fn active_style_tokens(&self) -> Option<&StyleTokenSet> {
        self.style_tokens.as_ref().filter(|t| !t.is_empty())
    }

    /// Design-system URL that should produce an instruction block, if any.
    pub fn active_design_system_url(&self) -> Option<&str> {
        self.design_system_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn has_any(&self) -> bool {
        self.active_style_tokens().is_some()
            || self.active_design_system_url().is_some()
            || !self.component_catalog.is_empty()
    }
}

/// One generated or refined (markup, stylesheet) pair for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub device: String,
    pub html: String,
    pub css: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_token_set_dedups_in_order() {
        let tokens = StyleTokenSet::new(
            s(&["#111", "#222", "#111", " "]),
            s(&["Inter", "Inter", "Roboto"]),
            vec![],
            s(&["Grid"]),
        );
        assert_eq!(tokens.colors, s(&["#111", "#222"]));
        assert_eq!(tokens.primary_color(), Some("#111"));
        assert_eq!(tokens.primary_font(), Some("Inter"));
        assert_eq!(tokens.fonts.len(), 2);
    }

    #[test]
    fn test_empty_tokens_are_inactive() {
        let bundle = ConstraintBundle::default().with_style_tokens(StyleTokenSet::default());
        assert!(bundle.active_style_tokens().is_none());
        assert!(!bundle.has_any());
    }

    #[test]
    fn test_token_set_deserializes_partial() {
        let tokens: StyleTokenSet = serde_json::from_str(r##"{"colors":["#fff"]}"##).unwrap();
        assert_eq!(tokens.colors, s(&["#fff"]));
        assert!(tokens.fonts.is_empty());
    }
}
