//! DZHR Scraper
//!
//! Renders reference pages in headless Chromium and turns what it sees into
//! style tokens and design-system vocabularies.

pub mod browser;
pub mod error;
pub mod extractor;
pub mod heuristics;

use std::path::PathBuf;

pub use browser::{BrowserLauncher, BrowserSession, ChromiumLauncher, ComputedStyles};
pub use error::{ScrapeError, ScrapeResult};
pub use extractor::{HeadlessExtractor, NAVIGATION_TIMEOUT};

/// The production extractor: one Chromium per call.
pub fn chromium_extractor(executable: Option<PathBuf>, no_sandbox: bool) -> HeadlessExtractor {
    HeadlessExtractor::new(ChromiumLauncher::new(executable, no_sandbox))
}
