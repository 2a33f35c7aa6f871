//! Scraper errors.

use std::time::Duration;

use dzhr_core::DzhrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Style evaluation failed: {0}")]
    Evaluation(String),

    #[error("Page did not settle within {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

impl From<ScrapeError> for DzhrError {
    fn from(e: ScrapeError) -> Self {
        DzhrError::Scrape(e.to_string())
    }
}
