//! [`StyleExtractor`] backed by a headless browser.

use std::time::Duration;

use async_trait::async_trait;
use dzhr_core::design::StyleTokenSet;
use dzhr_core::design::model::dedup_ordered;
use dzhr_core::extract::{
    DEFAULT_SPACING, DesignSystemScan, MAX_PAGE_COLORS, MAX_PAGE_FONTS, MAX_SPACING_TOKENS,
    StyleExtractor,
};
use dzhr_core::DzhrResult;
use tracing::{debug, info, warn};

use crate::browser::{BrowserLauncher, BrowserSession, ChromiumLauncher, ComputedStyles};
use crate::error::{ScrapeError, ScrapeResult};
use crate::heuristics;

/// Upper bound on navigation plus evaluation of one page.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// What one browser visit produced.
#[derive(Debug, Clone, Default)]
struct RenderedPage {
    computed: Option<ComputedStyles>,
    html: String,
}

/// Extracts style tokens by rendering pages in a freshly launched browser.
pub struct HeadlessExtractor<L = ChromiumLauncher> {
    launcher: L,
    timeout: Duration,
}

impl<L: BrowserLauncher> HeadlessExtractor<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher, timeout: NAVIGATION_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Launch, visit `url`, and close the browser whatever the outcome.
    async fn render(&self, url: &str, with_computed: bool) -> ScrapeResult<RenderedPage> {
        let mut session = self.launcher.launch().await?;
        debug!(url, "Rendering page");

        let visited = match tokio::time::timeout(self.timeout, visit(&mut session, url, with_computed)).await {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::Timeout(self.timeout)),
        };

        if let Err(e) = session.close().await {
            warn!(url, error = %e, "Failed to close browser");
        }
        visited
    }
}

async fn visit<S: BrowserSession>(session: &mut S, url: &str, with_computed: bool) -> ScrapeResult<RenderedPage> {
    session.navigate(url).await?;
    let computed = if with_computed {
        Some(session.computed_styles().await?)
    } else {
        None
    };
    let html = session.content().await?;
    Ok(RenderedPage { computed, html })
}

fn capped(values: Vec<String>, cap: usize) -> Vec<String> {
    let mut values = dedup_ordered(values);
    values.truncate(cap);
    values
}

fn page_tokens(page: RenderedPage) -> StyleTokenSet {
    let computed = page.computed.unwrap_or_default();
    let mut spacing = capped(computed.spacing, MAX_SPACING_TOKENS);
    if spacing.is_empty() {
        spacing = DEFAULT_SPACING.iter().map(|s| s.to_string()).collect();
    }
    StyleTokenSet {
        colors: capped(computed.colors, MAX_PAGE_COLORS),
        fonts: capped(computed.fonts, MAX_PAGE_FONTS),
        spacing,
        layouts: heuristics::detect_layouts(&page.html),
    }
}

fn design_system_scan(page: RenderedPage, url: &str) -> DesignSystemScan {
    let (components, component_links) = heuristics::detect_components(&page.html, url);
    DesignSystemScan {
        components,
        component_links,
        colors: heuristics::detect_palette_colors(&page.html),
        ..DesignSystemScan::with_defaults()
    }
}

#[async_trait]
impl<L: BrowserLauncher> StyleExtractor for HeadlessExtractor<L> {
    async fn extract_page_styles(&self, url: &str) -> DzhrResult<StyleTokenSet> {
        let page = self.render(url, true).await.map_err(|e| {
            warn!(url, error = %e, "Failed to scrape website");
            e
        })?;
        let tokens = page_tokens(page);
        info!(
            url,
            colors = tokens.colors.len(),
            fonts = tokens.fonts.len(),
            layouts = tokens.layouts.len(),
            "Page styles extracted"
        );
        Ok(tokens)
    }

    async fn extract_design_system_tokens(&self, url: &str) -> DzhrResult<DesignSystemScan> {
        let page = self.render(url, false).await.map_err(|e| {
            warn!(url, error = %e, "Failed to scrape design system");
            e
        })?;
        let scan = design_system_scan(page, url);
        info!(
            url,
            components = scan.components.len(),
            links = scan.component_links.len(),
            "Design system extracted"
        );
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dzhr_core::DzhrError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE: &str = r#"<html><head><style>main { display: grid }</style></head>
        <body><h2>Buttons</h2><a href="/docs/modal">Modal</a></body></html>"#;

    #[derive(Default)]
    struct Counters {
        launched: AtomicUsize,
        closed: AtomicUsize,
    }

    /// Hands out sessions that record their own lifecycle.
    struct FakeLauncher {
        counters: Arc<Counters>,
        fail_navigation_for: Option<&'static str>,
        hang: bool,
    }

    struct FakeSession {
        id: usize,
        counters: Arc<Counters>,
        fail_navigation_for: Option<&'static str>,
        hang: bool,
        closed: bool,
    }

    #[async_trait]
    impl BrowserLauncher for FakeLauncher {
        type Session = FakeSession;

        async fn launch(&self) -> ScrapeResult<FakeSession> {
            let id = self.counters.launched.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                id,
                counters: self.counters.clone(),
                fail_navigation_for: self.fail_navigation_for,
                hang: self.hang,
                closed: false,
            })
        }
    }

    #[async_trait]
    impl BrowserSession for FakeSession {
        async fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
            assert!(!self.closed, "session {} used after close", self.id);
            if self.hang {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            if self.fail_navigation_for == Some(url) {
                return Err(ScrapeError::Navigation(format!("net::ERR_NAME_NOT_RESOLVED at {url}")));
            }
            tokio::task::yield_now().await;
            Ok(())
        }

        async fn computed_styles(&mut self) -> ScrapeResult<ComputedStyles> {
            Ok(ComputedStyles {
                colors: vec!["rgb(0, 0, 0)".into(), "rgb(255, 255, 255)".into(), "rgb(0, 0, 0)".into()],
                fonts: vec!["Inter".into()],
                spacing: vec![],
            })
        }

        async fn content(&mut self) -> ScrapeResult<String> {
            Ok(PAGE.to_string())
        }

        async fn close(&mut self) -> ScrapeResult<()> {
            assert!(!self.closed, "session {} closed twice", self.id);
            self.closed = true;
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn extractor(fail_navigation_for: Option<&'static str>, hang: bool) -> (HeadlessExtractor<FakeLauncher>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let launcher = FakeLauncher { counters: counters.clone(), fail_navigation_for, hang };
        (HeadlessExtractor::new(launcher), counters)
    }

    #[tokio::test]
    async fn test_concurrent_calls_use_separate_browsers() {
        let (extractor, counters) = extractor(Some("https://broken.example"), false);

        let (ok, failed) = tokio::join!(
            extractor.extract_page_styles("https://example.com"),
            extractor.extract_page_styles("https://broken.example"),
        );

        assert!(ok.is_ok());
        assert!(matches!(failed, Err(DzhrError::Scrape(ref m)) if m.contains("ERR_NAME_NOT_RESOLVED")));
        assert_eq!(counters.launched.load(Ordering::SeqCst), 2);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_page_tokens() {
        let (extractor, _) = extractor(None, false);
        let tokens = extractor.extract_page_styles("https://example.com").await.unwrap();
        assert_eq!(tokens.colors, vec!["rgb(0, 0, 0)", "rgb(255, 255, 255)"]);
        assert_eq!(tokens.fonts, vec!["Inter"]);
        assert_eq!(tokens.spacing, vec!["16px", "24px", "32px", "48px"]);
        assert_eq!(tokens.layouts, vec!["Grid"]);
    }

    #[tokio::test]
    async fn test_design_system_scan() {
        let (extractor, counters) = extractor(None, false);
        let scan = extractor.extract_design_system_tokens("https://ds.example.com/").await.unwrap();
        assert_eq!(scan.components, vec!["Button", "Modal"]);
        assert_eq!(scan.component_links, vec!["https://ds.example.com/docs/modal"]);
        assert_eq!(scan.principles, vec!["Consistency", "Clarity", "Accessibility"]);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_still_closes_browser() {
        let (extractor, counters) = extractor(None, true);
        let extractor = extractor.with_timeout(Duration::from_millis(20));
        let err = extractor.extract_page_styles("https://slow.example").await.unwrap_err();
        assert!(matches!(err, DzhrError::Scrape(ref m) if m.contains("did not settle")));
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }
}
