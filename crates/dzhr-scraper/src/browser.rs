//! Browser sessions.
//!
//! A [`BrowserLauncher`] starts one isolated browser per call; the
//! [`BrowserSession`] it returns is owned by exactly one extraction and
//! closed by it.

use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{ScrapeError, ScrapeResult};

/// Binaries tried on `PATH` when no executable is configured.
const BROWSER_CANDIDATES: &[&str] = &["chromium", "chromium-browser", "google-chrome"];

/// Walks every rendered element and collects computed colors, primary
/// font families and non-zero pixel spacing.
const COMPUTED_STYLES_JS: &str = r#"(() => {
  const colors = new Set();
  const fonts = new Set();
  const spacing = new Set();
  const spacingProps = ['marginTop', 'marginBottom', 'paddingTop', 'paddingBottom', 'rowGap', 'columnGap'];
  const visible = (c) => c && c !== 'rgba(0, 0, 0, 0)' && c !== 'transparent';
  for (const el of document.querySelectorAll('*')) {
    const cs = window.getComputedStyle(el);
    if (visible(cs.backgroundColor)) colors.add(cs.backgroundColor);
    if (visible(cs.color)) colors.add(cs.color);
    if (cs.fontFamily) {
      const primary = cs.fontFamily.split(',')[0].replace(/['"]/g, '').trim();
      if (primary) fonts.add(primary);
    }
    for (const prop of spacingProps) {
      const v = cs[prop];
      if (v && v.endsWith('px') && parseFloat(v) > 0) spacing.add(v);
    }
  }
  return { colors: [...colors], fonts: [...fonts], spacing: [...spacing] };
})()"#;

/// Values read from the live page's computed styles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComputedStyles {
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub fonts: Vec<String>,
    #[serde(default)]
    pub spacing: Vec<String>,
}

/// One running browser, used by a single extraction.
#[async_trait]
pub trait BrowserSession: Send {
    /// Open `url` and wait for the page to load.
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()>;

    async fn computed_styles(&mut self) -> ScrapeResult<ComputedStyles>;

    /// Serialized DOM of the current page.
    async fn content(&mut self) -> ScrapeResult<String>;

    /// Shut the browser down and release its resources.
    async fn close(&mut self) -> ScrapeResult<()>;
}

/// Starts a fresh browser for every call.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> ScrapeResult<Self::Session>;
}

/// Launches headless Chromium over the DevTools protocol.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
    no_sandbox: bool,
}

impl ChromiumLauncher {
    /// Use `executable` when given, otherwise the first known browser on `PATH`,
    /// otherwise the driver's own discovery.
    pub fn new(executable: Option<PathBuf>, no_sandbox: bool) -> Self {
        let executable = executable.or_else(|| {
            BROWSER_CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok())
        });
        Self { executable, no_sandbox }
    }

    pub fn executable(&self) -> Option<&PathBuf> {
        self.executable.as_ref()
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> ScrapeResult<ChromiumSession> {
        let profile = tempfile::Builder::new().prefix("dzhr-browser-").tempdir()?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile.path())
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder.build().map_err(ScrapeError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        debug!(profile = %profile.path().display(), "Browser launched");

        Ok(ChromiumSession {
            browser,
            page: None,
            handler,
            _profile: profile,
        })
    }
}

/// A launched Chromium process with its event loop and throwaway profile.
pub struct ChromiumSession {
    browser: Browser,
    page: Option<Page>,
    handler: JoinHandle<()>,
    _profile: TempDir,
}

impl ChromiumSession {
    fn page(&self) -> ScrapeResult<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| ScrapeError::Navigation("no page is open".into()))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        self.page = Some(page);
        Ok(())
    }

    async fn computed_styles(&mut self) -> ScrapeResult<ComputedStyles> {
        self.page()?
            .evaluate(COMPUTED_STYLES_JS)
            .await
            .map_err(|e| ScrapeError::Evaluation(e.to_string()))?
            .into_value()
            .map_err(|e| ScrapeError::Evaluation(e.to_string()))
    }

    async fn content(&mut self) -> ScrapeResult<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| ScrapeError::Evaluation(e.to_string()))
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        self.page = None;
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Browser process did not exit cleanly");
        }
        self.handler.abort();
        closed.map(|_| ()).map_err(|e| ScrapeError::Launch(e.to_string()))
    }
}
