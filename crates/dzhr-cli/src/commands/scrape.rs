//! Style extraction command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dzhr_core::analysis::StyleAnalyzer;
use dzhr_core::config::AppConfig;
use dzhr_core::extract::{StyleExtractor, validate_scrape_url};
use std::path::PathBuf;
use std::sync::Arc;

use crate::output;

#[derive(Args)]
pub struct ScrapeArgs {
    /// Page to analyze (http or https)
    pub url: String,

    /// Treat the page as design-system documentation
    #[arg(long)]
    pub design_system: bool,

    /// Skip the model pass and report only what the browser saw
    #[arg(long)]
    pub no_ai: bool,

    /// Print JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Chromium executable
    #[arg(long, env = "CHROMIUM_PATH")]
    pub chromium_path: Option<PathBuf>,

    /// Launch the browser without its sandbox
    #[arg(long, env = "DZHR_BROWSER_NO_SANDBOX")]
    pub no_sandbox: bool,
}

pub async fn execute(args: ScrapeArgs) -> Result<()> {
    let url = validate_scrape_url(&args.url)?.to_string();
    let extractor: Arc<dyn StyleExtractor> =
        Arc::new(dzhr_scraper::chromium_extractor(args.chromium_path.clone(), args.no_sandbox));

    eprintln!("{} {}", "Scraping".cyan().bold(), url);

    if args.design_system {
        let scan = if args.no_ai {
            extractor.extract_design_system_tokens(&url).await?
        } else {
            analyzer(extractor)?.analyze_design_system(&url).await?
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&scan)?);
        } else {
            output::print_design_system_scan(&scan);
        }
    } else {
        let tokens = if args.no_ai {
            extractor.extract_page_styles(&url).await?
        } else {
            analyzer(extractor)?.analyze_template(&url).await?
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            output::print_style_tokens(&tokens);
        }
    }

    Ok(())
}

fn analyzer(extractor: Arc<dyn StyleExtractor>) -> Result<StyleAnalyzer> {
    let config = AppConfig::from_env()?;
    Ok(StyleAnalyzer::new(extractor, config.text_generator()))
}
