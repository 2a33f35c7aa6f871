//! Heuristic quality scoring of generated markup and stylesheets.
//!
//! Starts at 100 and subtracts a fixed penalty for each known failure smell.
//! The result is advisory: it is logged, never used to reject an artifact.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: u8 = 70;

pub const MIN_HTML_CHARS: usize = 100;
pub const MIN_CSS_CHARS: usize = 50;

pub const PENALTY_SHORT_HTML: u8 = 50;
pub const PENALTY_LOREM_IPSUM: u8 = 15;
pub const PENALTY_PLACEHOLDER: u8 = 10;
pub const PENALTY_NO_SEMANTIC_TAGS: u8 = 10;
pub const PENALTY_SHORT_CSS: u8 = 30;
pub const PENALTY_NO_MODERN_LAYOUT: u8 = 10;
pub const PENALTY_NO_COLOR: u8 = 15;

const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder text",
    "your text here",
    "your content here",
    "content goes here",
    "insert content",
    "[placeholder",
];

const SEMANTIC_TAGS: &[&str] = &[
    "<header", "<nav", "<main", "<section", "<article", "<aside", "<footer",
];

const LAYOUT_PRIMITIVES: &[&str] = &["flex", "grid", "var(--"];

const COLOR_MARKERS: &[&str] = &["color", "background", "fill", "rgb(", "rgba(", "hsl(", "hsla("];

/// Result of scoring one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub is_valid: bool,
    /// 0..=100
    pub score: u8,
    pub issues: Vec<String>,
}

/// Scores generated output. The pass threshold is configurable; the
/// checks and their weights are not.
#[derive(Debug, Clone, Copy)]
pub struct ResponseValidator {
    threshold: u8,
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl ResponseValidator {
    pub fn new(threshold: u8) -> Self {
        Self { threshold: threshold.min(100) }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn score(&self, html: &str, css: &str) -> QualityReport {
        let mut penalty: u32 = 0;
        let mut issues = Vec::new();
        let mut deduct = |points: u8, issue: String| {
            penalty += u32::from(points);
            issues.push(issue);
        };

        let html_lower = html.to_lowercase();
        let css_lower = css.to_lowercase();

        let html_len = html.trim().chars().count();
        if html_len < MIN_HTML_CHARS {
            deduct(PENALTY_SHORT_HTML, format!("HTML is too short ({} characters)", html_len));
        }
        if html_lower.contains("lorem ipsum") {
            deduct(PENALTY_LOREM_IPSUM, "HTML contains lorem ipsum placeholder text".to_string());
        }
        if PLACEHOLDER_MARKERS.iter().any(|m| html_lower.contains(m)) {
            deduct(PENALTY_PLACEHOLDER, "HTML contains generic placeholder content".to_string());
        }
        if !SEMANTIC_TAGS.iter().any(|t| html_lower.contains(t)) {
            deduct(PENALTY_NO_SEMANTIC_TAGS, "HTML has no semantic landmark elements".to_string());
        }

        let css_len = css.trim().chars().count();
        if css_len < MIN_CSS_CHARS {
            deduct(PENALTY_SHORT_CSS, format!("CSS is too short ({} characters)", css_len));
        }
        if !LAYOUT_PRIMITIVES.iter().any(|p| css_lower.contains(p)) {
            deduct(PENALTY_NO_MODERN_LAYOUT, "CSS uses no flexbox, grid or custom properties".to_string());
        }
        if !COLOR_MARKERS.iter().any(|c| css_lower.contains(c)) {
            deduct(PENALTY_NO_COLOR, "CSS declares no colors".to_string());
        }

        let score = 100u32.saturating_sub(penalty) as u8;
        QualityReport {
            is_valid: score >= self.threshold,
            score,
            issues,
        }
    }
}

/// Score with the default threshold.
pub fn score(html: &str, css: &str) -> QualityReport {
    ResponseValidator::default().score(html, css)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_HTML: &str = "<header><nav><a href=\"/\">Home</a></nav></header>\
        <main><h1>Simple pricing</h1><section class=\"plans\"><article>Starter plan for small teams</article></section></main>\
        <footer>Contact us</footer>";
    const GOOD_CSS: &str = ":root { --brand: #0a84ff; } .plans { display: grid; gap: 24px; color: var(--brand); }";

    #[test]
    fn test_clean_output_scores_full() {
        let report = score(GOOD_HTML, GOOD_CSS);
        assert_eq!(report.score, 100);
        assert!(report.is_valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_empty_output_floors_at_zero() {
        let report = score("", "");
        // 50 + 10 + 30 + 10 + 15 = 115
        assert_eq!(report.score, 0);
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 5);
    }

    #[test]
    fn test_each_smell_has_fixed_weight() {
        let lorem = GOOD_HTML.replace("Starter plan for small teams", "Lorem ipsum dolor sit amet");
        assert_eq!(score(&lorem, GOOD_CSS).score, 100 - PENALTY_LOREM_IPSUM);

        let placeholder = GOOD_HTML.replace("Contact us", "Your content here");
        assert_eq!(score(&placeholder, GOOD_CSS).score, 100 - PENALTY_PLACEHOLDER);

        let div_only = "<div><h1>Simple pricing</h1><div>Starter plan for small teams, billed monthly, cancel anytime you like.</div></div>";
        assert_eq!(score(div_only, GOOD_CSS).score, 100 - PENALTY_NO_SEMANTIC_TAGS);

        let no_layout = ".plans { margin: 0 auto; padding: 24px 32px; color: #0a84ff; }";
        assert_eq!(score(GOOD_HTML, no_layout).score, 100 - PENALTY_NO_MODERN_LAYOUT);

        let no_color = ".plans { display: grid; gap: 24px; padding: 32px 48px; margin: 0; }";
        assert_eq!(score(GOOD_HTML, no_color).score, 100 - PENALTY_NO_COLOR);
    }

    #[test]
    fn test_adding_smells_never_increases_score() {
        let base = score(GOOD_HTML, GOOD_CSS).score;
        let with_lorem = format!("{} <p>lorem ipsum</p>", GOOD_HTML);
        let s1 = score(&with_lorem, GOOD_CSS).score;
        let with_placeholder = format!("{} <p>placeholder text</p>", with_lorem);
        let s2 = score(&with_placeholder, GOOD_CSS).score;
        let s3 = score(&with_placeholder, "a{}").score;
        assert!(base >= s1 && s1 >= s2 && s2 >= s3);
        assert!(s3 <= 100);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let html = GOOD_HTML.replace("Contact us", "Lorem ipsum");
        let strict = ResponseValidator::new(90).score(&html, GOOD_CSS);
        let lenient = ResponseValidator::new(80).score(&html, GOOD_CSS);
        assert_eq!(strict.score, 85);
        assert!(!strict.is_valid);
        assert!(lenient.is_valid);
    }
}
