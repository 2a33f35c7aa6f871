//! Static-DOM heuristics over the serialized page.

use std::collections::HashSet;
use std::sync::LazyLock;

use dzhr_core::design::model::dedup_ordered;
use dzhr_core::extract::MAX_PAGE_COLORS;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Keyword matched in page text, and the component name it maps to.
pub const COMPONENT_VOCABULARY: &[(&str, &str)] = &[
    ("button", "Button"),
    ("card", "Card"),
    ("input", "Input"),
    ("modal", "Modal"),
    ("dropdown", "Dropdown"),
    ("table", "Table"),
    ("form", "Form"),
    ("tabs", "Tabs"),
    ("badge", "Badge"),
    ("alert", "Alert"),
    ("navigation", "Navigation"),
    ("tooltip", "Tooltip"),
    ("avatar", "Avatar"),
    ("checkbox", "Checkbox"),
    ("select", "Select"),
];

/// Vocabulary keywords as whole words, allowing a plural suffix.
static VOCABULARY_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    let keywords: Vec<String> = COMPONENT_VOCABULARY.iter().map(|(k, _)| regex::escape(k)).collect();
    Regex::new(&format!(r"\b({})(?:e?s)?\b", keywords.join("|"))).expect("vocabulary regex")
});

static DISPLAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display\s*:\s*(?:inline-)?(grid|flex)\b").expect("display regex")
});

static BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)background(?:-color)?\s*:\s*([^;]+)").expect("background regex")
});

static ALL: LazyLock<Selector> = LazyLock::new(|| selector("*"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3, h4"));
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static PALETTE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[class*="color"], [class*="palette"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Layout idioms declared in inline `style` attributes and `<style>` blocks,
/// in document order: `Grid` and/or `Flexbox`.
pub fn detect_layouts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut found = Vec::new();
    for el in document.select(&ALL) {
        let declarations = if el.value().name() == "style" {
            text_of(el)
        } else {
            match el.value().attr("style") {
                Some(style) => style.to_string(),
                None => continue,
            }
        };
        for cap in DISPLAY.captures_iter(&declarations) {
            let layout = if cap[1].eq_ignore_ascii_case("grid") { "Grid" } else { "Flexbox" };
            found.push(layout.to_string());
        }
    }
    dedup_ordered(found)
}

fn match_vocabulary(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    let found: HashSet<&str> = VOCABULARY_WORDS
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();
    COMPONENT_VOCABULARY
        .iter()
        .filter(move |(keyword, _)| found.contains(*keyword))
        .map(|(_, name)| *name)
}

/// Absolute http(s) form of `href`, resolved against the page URL.
fn absolute_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Components named by headings and anchors, plus the links of matching anchors.
pub fn detect_components(html: &str, page_url: &str) -> (Vec<String>, Vec<String>) {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    let mut components = Vec::new();
    let mut links = Vec::new();

    for heading in document.select(&HEADINGS) {
        let text = text_of(heading).to_lowercase();
        components.extend(match_vocabulary(&text).map(str::to_string));
    }

    for anchor in document.select(&ANCHORS) {
        let href = anchor.value().attr("href").unwrap_or_default();
        let haystack = format!("{} {}", text_of(anchor), href).to_lowercase();
        let matched: Vec<&str> = match_vocabulary(&haystack).collect();
        if matched.is_empty() {
            continue;
        }
        components.extend(matched.into_iter().map(str::to_string));
        if let Some(link) = absolute_link(base.as_ref(), href) {
            links.push(link);
        }
    }

    (dedup_ordered(components), dedup_ordered(links))
}

/// Inline background colors of palette swatches.
pub fn detect_palette_colors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let colors = document
        .select(&PALETTE)
        .filter_map(|el| el.value().attr("style"))
        .filter_map(|style| BACKGROUND.captures(style).map(|cap| cap[1].trim().to_string()))
        .filter(|color| !color.eq_ignore_ascii_case("transparent"));
    let mut colors = dedup_ordered(colors);
    colors.truncate(MAX_PAGE_COLORS);
    colors
}
