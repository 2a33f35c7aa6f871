//! Style-extraction capability.
//!
//! The browser-backed implementation lives in `dzhr-scraper`; everything in
//! this crate talks to [`StyleExtractor`] only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::design::StyleTokenSet;
use crate::error::{DzhrError, DzhrResult};

pub const MAX_PAGE_COLORS: usize = 10;
pub const MAX_PAGE_FONTS: usize = 5;
pub const MAX_SPACING_TOKENS: usize = 8;

/// Spacing scale reported when a page exposes none.
pub const DEFAULT_SPACING: &[&str] = &["16px", "24px", "32px", "48px"];

pub const DEFAULT_TYPOGRAPHY: &[&str] = &["heading-1", "heading-2", "body", "caption"];
pub const DEFAULT_SPACING_SCALE: &[&str] = &["xs", "sm", "md", "lg", "xl"];
pub const DEFAULT_PRINCIPLES: &[&str] = &["Consistency", "Clarity", "Accessibility"];

/// What a scan of a design-system documentation page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystemScan {
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub component_links: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub typography: Vec<String>,
    #[serde(default)]
    pub spacing: Vec<String>,
    #[serde(default)]
    pub principles: Vec<String>,
}

impl DesignSystemScan {
    /// A scan carrying the default typography, spacing and principles.
    pub fn with_defaults() -> Self {
        Self {
            typography: owned(DEFAULT_TYPOGRAPHY),
            spacing: owned(DEFAULT_SPACING_SCALE),
            principles: owned(DEFAULT_PRINCIPLES),
            ..Self::default()
        }
    }
}

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Extracts style tokens from a live web page.
///
/// Implementations own any browser they launch for the duration of one
/// call and release it before returning, on success and on failure.
#[async_trait]
pub trait StyleExtractor: Send + Sync {
    async fn extract_page_styles(&self, url: &str) -> DzhrResult<StyleTokenSet>;

    async fn extract_design_system_tokens(&self, url: &str) -> DzhrResult<DesignSystemScan>;
}

/// Reject anything that is not an absolute http(s) URL.
pub fn validate_scrape_url(url: &str) -> DzhrResult<&str> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| DzhrError::InvalidUrl("URL must start with http:// or https://".into()))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(DzhrError::InvalidUrl(format!("URL has no host: {}", url)));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_validation() {
        assert_eq!(validate_scrape_url(" https://example.com ").unwrap(), "https://example.com");
        assert!(validate_scrape_url("http://localhost:3000/docs").is_ok());
        for bad in ["ftp://example.com", "example.com", "javascript:alert(1)", "https://", ""] {
            assert!(matches!(validate_scrape_url(bad), Err(DzhrError::InvalidUrl(_))), "{bad}");
        }
    }

    #[test]
    fn test_scan_defaults() {
        let scan = DesignSystemScan::with_defaults();
        assert!(scan.components.is_empty());
        assert_eq!(scan.principles, vec!["Consistency", "Clarity", "Accessibility"]);
        let json = serde_json::to_value(&scan).unwrap();
        assert!(json.get("componentLinks").is_some());
    }
}
