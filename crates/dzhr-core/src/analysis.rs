//! Style analysis of reference URLs.
//!
//! A scrape and a model-assisted pass over the same URL run side by side.
//! Their answers are merged; either one alone is enough to answer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::design::StyleTokenSet;
use crate::design::model::dedup_ordered;
use crate::error::{DzhrError, DzhrResult};
use crate::extract::{DesignSystemScan, MAX_PAGE_COLORS, MAX_PAGE_FONTS, StyleExtractor, validate_scrape_url};
use crate::generate::parse::parse_json_answer;
use crate::llm::{CompletionRequest, TextGenerator};

const TEMPLATE_SYSTEM: &str = "You are a design analysis expert. Analyze the provided website URL and \
    extract key design patterns, color schemes, typography, spacing, and layout structures. \
    Return the analysis in JSON format.";

const DESIGN_SYSTEM_SYSTEM: &str = "You are a design system analysis expert. Analyze the provided design \
    system documentation URL and extract component patterns, color palettes, typography systems, and \
    design principles. Return the analysis in JSON format.";

const ANALYSIS_MAX_TOKENS: u32 = 1024;

/// Model-assisted reading of a design-system documentation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSystemInsights {
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub typography: Vec<String>,
    #[serde(default)]
    pub spacing: Vec<String>,
    #[serde(default)]
    pub principles: Vec<String>,
}

fn template_request(url: &str) -> CompletionRequest {
    CompletionRequest::new(
        TEMPLATE_SYSTEM,
        format!(
            "Analyze this website and extract its design system: {url}. Provide colors (hex codes), \
             fonts (font families), spacing patterns (px/rem values), and layout structures \
             (grid/flexbox patterns). Respond with JSON in this format: \
             {{ \"colors\": [\"#hex1\", \"#hex2\"], \"fonts\": [\"Font1\", \"Font2\"], \
             \"spacing\": [\"16px\", \"24px\"], \"layouts\": [\"Grid\", \"Flexbox\"] }}"
        ),
        ANALYSIS_MAX_TOKENS,
    )
}

fn design_system_request(url: &str) -> CompletionRequest {
    CompletionRequest::new(
        DESIGN_SYSTEM_SYSTEM,
        format!(
            "Analyze this design system documentation and extract key information: {url}. Provide \
             component types, color tokens, typography scale, spacing system, and design principles. \
             Respond with JSON in this format: {{ \"components\": [\"Button\", \"Card\"], \
             \"colors\": [\"#primary\", \"#secondary\"], \"typography\": [\"heading-1\", \"body\"], \
             \"spacing\": [\"xs\", \"sm\", \"md\"], \"principles\": [\"Consistency\", \"Clarity\"] }}"
        ),
        ANALYSIS_MAX_TOKENS,
    )
}

fn parse_answer<T: Default + for<'de> Deserialize<'de>>(raw: &str) -> DzhrResult<T> {
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(parse_json_answer(raw)?)
}

/// Ask the model for the style tokens of a website.
pub async fn analyze_website_template(
    generator: &dyn TextGenerator,
    url: &str,
) -> DzhrResult<StyleTokenSet> {
    let raw = generator.complete_json(template_request(url)).await?;
    parse_answer(&raw)
}

/// Ask the model for the vocabulary of a design-system documentation site.
pub async fn analyze_design_system(
    generator: &dyn TextGenerator,
    url: &str,
) -> DzhrResult<DesignSystemInsights> {
    let raw = generator.complete_json(design_system_request(url)).await?;
    parse_answer(&raw)
}

fn capped(mut values: Vec<String>, cap: usize) -> Vec<String> {
    values.truncate(cap);
    values
}

fn prefer_non_empty(preferred: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    if preferred.iter().any(|v| !v.trim().is_empty()) {
        dedup_ordered(preferred)
    } else {
        fallback
    }
}

/// Merge scraped page tokens with the model's answer.
///
/// Scraped values come first; colors and fonts stay capped. Spacing is
/// taken from the model when it has any, otherwise from the scrape.
pub fn merge_template_styles(scraped: StyleTokenSet, ai: Option<StyleTokenSet>) -> StyleTokenSet {
    let ai = ai.unwrap_or_default();
    StyleTokenSet {
        colors: capped(dedup_ordered(scraped.colors.into_iter().chain(ai.colors)), MAX_PAGE_COLORS),
        fonts: capped(dedup_ordered(scraped.fonts.into_iter().chain(ai.fonts)), MAX_PAGE_FONTS),
        spacing: prefer_non_empty(ai.spacing, scraped.spacing),
        layouts: dedup_ordered(scraped.layouts.into_iter().chain(ai.layouts)),
    }
}

/// Merge a design-system scan with the model's answer.
pub fn merge_design_system(scraped: DesignSystemScan, ai: Option<DesignSystemInsights>) -> DesignSystemScan {
    let ai = ai.unwrap_or_default();
    DesignSystemScan {
        components: dedup_ordered(scraped.components.into_iter().chain(ai.components)),
        component_links: scraped.component_links,
        colors: capped(dedup_ordered(scraped.colors.into_iter().chain(ai.colors)), MAX_PAGE_COLORS),
        typography: prefer_non_empty(ai.typography, scraped.typography),
        spacing: prefer_non_empty(ai.spacing, scraped.spacing),
        principles: prefer_non_empty(ai.principles, scraped.principles),
    }
}

/// Scrape-then-enrich analysis of reference URLs.
#[derive(Clone)]
pub struct StyleAnalyzer {
    extractor: Arc<dyn StyleExtractor>,
    generator: Arc<dyn TextGenerator>,
}

impl StyleAnalyzer {
    pub fn new(extractor: Arc<dyn StyleExtractor>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { extractor, generator }
    }

    /// Style tokens of a website template.
    ///
    /// Fails when the URL is rejected or when both the scrape and the
    /// model pass fail.
    pub async fn analyze_template(&self, url: &str) -> DzhrResult<StyleTokenSet> {
        let url = validate_scrape_url(url)?;
        info!(url, "Analyzing template");
        let (scraped, ai) = tokio::join!(
            self.extractor.extract_page_styles(url),
            analyze_website_template(self.generator.as_ref(), url),
        );

        match scraped {
            Ok(scraped) => {
                debug!(colors = scraped.colors.len(), fonts = scraped.fonts.len(), "Template scraped");
                Ok(merge_template_styles(scraped, best_effort(url, ai)))
            }
            Err(e) => {
                let ai = only_ai(url, e, ai)?;
                Ok(merge_template_styles(StyleTokenSet::default(), Some(ai)))
            }
        }
    }

    /// Components and tokens of a design-system documentation site.
    pub async fn analyze_design_system(&self, url: &str) -> DzhrResult<DesignSystemScan> {
        let url = validate_scrape_url(url)?;
        info!(url, "Analyzing design system");
        let (scraped, ai) = tokio::join!(
            self.extractor.extract_design_system_tokens(url),
            analyze_design_system(self.generator.as_ref(), url),
        );

        match scraped {
            Ok(scraped) => {
                debug!(components = scraped.components.len(), "Design system scraped");
                Ok(merge_design_system(scraped, best_effort(url, ai)))
            }
            Err(e) => {
                let ai = only_ai(url, e, ai)?;
                Ok(merge_design_system(DesignSystemScan::with_defaults(), Some(ai)))
            }
        }
    }
}

fn best_effort<T>(url: &str, ai: DzhrResult<T>) -> Option<T> {
    match ai {
        Ok(answer) => Some(answer),
        Err(e) => {
            warn!(url, error = %e, "AI analysis unavailable, using scraped data only");
            None
        }
    }
}

/// The model's answer when the scrape failed, or the scrape error when
/// there is no answer either.
fn only_ai<T>(url: &str, scrape_error: DzhrError, ai: DzhrResult<T>) -> DzhrResult<T> {
    match ai {
        Ok(answer) => {
            warn!(url, error = %scrape_error, "Scrape failed, using AI analysis only");
            Ok(answer)
        }
        Err(ai_error) => {
            warn!(url, error = %ai_error, "AI analysis unavailable");
            Err(scrape_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    struct FixedExtractor {
        fail: bool,
    }

    #[async_trait]
    impl StyleExtractor for FixedExtractor {
        async fn extract_page_styles(&self, _url: &str) -> DzhrResult<StyleTokenSet> {
            if self.fail {
                return Err(DzhrError::Scrape("navigation timeout".into()));
            }
            Ok(StyleTokenSet::new(s(&["#111", "#222"]), s(&["Inter"]), s(&["16px"]), s(&["Grid"])))
        }

        async fn extract_design_system_tokens(&self, _url: &str) -> DzhrResult<DesignSystemScan> {
            Ok(DesignSystemScan {
                components: s(&["Button"]),
                component_links: s(&["https://ds.example.com/button"]),
                colors: s(&["#0a84ff"]),
                ..DesignSystemScan::with_defaults()
            })
        }
    }

    struct CannedGenerator {
        answer: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn complete_json(&self, request: CompletionRequest) -> DzhrResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(request.user.contains("https://"));
            self.answer
                .map(str::to_string)
                .ok_or_else(|| DzhrError::Generation("API error (HTTP 401)".into()))
        }
    }

    fn analyzer(fail_scrape: bool, answer: Option<&'static str>) -> (StyleAnalyzer, Arc<CannedGenerator>) {
        let generator = Arc::new(CannedGenerator { answer, calls: AtomicUsize::new(0) });
        let analyzer = StyleAnalyzer::new(Arc::new(FixedExtractor { fail: fail_scrape }), generator.clone());
        (analyzer, generator)
    }

    #[test]
    fn test_answer_with_fenced_values_parses_whole() {
        let raw = r#"{"components":["Code ```block```"],"principles":["Clarity"]}"#;
        let insights: DesignSystemInsights = parse_answer(raw).unwrap();
        assert_eq!(insights.components, s(&["Code ```block```"]));
        assert_eq!(insights.principles, s(&["Clarity"]));
    }

    #[test]
    fn test_template_merge_rules() {
        let scraped = StyleTokenSet::new(
            (0..8).map(|i| format!("#00000{i}")).collect(),
            s(&["Inter", "Roboto"]),
            s(&["16px", "24px"]),
            s(&["Grid"]),
        );
        let ai = StyleTokenSet::new(
            s(&["#000001", "#abcdef", "#123456", "#654321"]),
            s(&["Roboto", "Lato", "Georgia", "Arial", "Mono"]),
            s(&["1rem"]),
            s(&["Flexbox", "Grid"]),
        );
        let merged = merge_template_styles(scraped, Some(ai));
        assert_eq!(merged.colors.len(), 10);
        assert_eq!(merged.colors[8], "#abcdef");
        assert_eq!(merged.fonts, s(&["Inter", "Roboto", "Lato", "Georgia", "Arial"]));
        assert_eq!(merged.spacing, s(&["1rem"]));
        assert_eq!(merged.layouts, s(&["Grid", "Flexbox"]));
    }

    #[test]
    fn test_template_merge_keeps_scraped_spacing_when_ai_has_none() {
        let scraped = StyleTokenSet::new(vec![], vec![], s(&["16px", "24px"]), vec![]);
        let merged = merge_template_styles(scraped.clone(), Some(StyleTokenSet::default()));
        assert_eq!(merged.spacing, scraped.spacing);
        assert_eq!(merge_template_styles(scraped.clone(), None).spacing, scraped.spacing);
    }

    #[test]
    fn test_design_system_merge_rules() {
        let scraped = DesignSystemScan {
            components: s(&["Button", "Card"]),
            component_links: s(&["https://ds.example.com/button"]),
            ..DesignSystemScan::with_defaults()
        };
        let ai = DesignSystemInsights {
            components: s(&["Card", "Toast"]),
            principles: s(&["Density"]),
            ..Default::default()
        };
        let merged = merge_design_system(scraped, Some(ai));
        assert_eq!(merged.components, s(&["Button", "Card", "Toast"]));
        assert_eq!(merged.component_links, s(&["https://ds.example.com/button"]));
        assert_eq!(merged.principles, s(&["Density"]));
        assert_eq!(merged.typography, s(crate::extract::DEFAULT_TYPOGRAPHY));
    }

    #[tokio::test]
    async fn test_ai_failure_degrades_to_scrape() {
        let (analyzer, generator) = analyzer(false, None);
        let tokens = analyzer.analyze_template("https://example.com").await.unwrap();
        assert_eq!(tokens.colors, s(&["#111", "#222"]));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ai_answer_is_merged() {
        let (analyzer, _) = analyzer(false, Some(r##"{"colors":["#333"],"fonts":["Lato"],"layouts":["Flexbox"]}"##));
        let tokens = analyzer.analyze_template("https://example.com").await.unwrap();
        assert_eq!(tokens.colors, s(&["#111", "#222", "#333"]));
        assert_eq!(tokens.fonts, s(&["Inter", "Lato"]));
        assert_eq!(tokens.spacing, s(&["16px"]));
    }

    #[tokio::test]
    async fn test_malformed_ai_answer_degrades() {
        let (analyzer, _) = analyzer(false, Some("not json at all"));
        let scan = analyzer.analyze_design_system("https://ds.example.com").await.unwrap();
        assert_eq!(scan.components, s(&["Button"]));
    }

    #[tokio::test]
    async fn test_scrape_failure_falls_back_to_ai() {
        let (analyzer, generator) = analyzer(true, Some(r##"{"colors":["#333"],"fonts":["Lato"]}"##));
        let tokens = analyzer.analyze_template("https://example.com").await.unwrap();
        assert_eq!(tokens.colors, s(&["#333"]));
        assert_eq!(tokens.fonts, s(&["Lato"]));
        assert!(tokens.spacing.is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scrape_and_ai_failure_fails_analysis() {
        let (analyzer, _) = analyzer(true, None);
        let err = analyzer.analyze_template("https://example.com").await.unwrap_err();
        assert!(matches!(err, DzhrError::Scrape(_)));
    }

    #[tokio::test]
    async fn test_bad_scheme_rejected_before_scrape() {
        let (analyzer, generator) = analyzer(false, Some("{}"));
        let err = analyzer.analyze_template("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, DzhrError::InvalidUrl(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
