//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dzhr_core::config::DEFAULT_REDIS_URL;
use dzhr_core::store::RedisStore;

pub mod design;
pub mod design_system;
pub mod history;
pub mod parse;
pub mod scrape;
pub mod serve;

/// DZHR - prompt-driven multi-device UI mockups
#[derive(Parser)]
#[command(name = "dzhr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Redis instance holding design systems and prompt history
    #[arg(long, global = true, env = "REDIS_URL", default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API
    Serve(serve::ServeArgs),

    /// Generate one design per device from a brief
    Generate(design::GenerateArgs),

    /// Refine previously generated designs
    Refine(design::RefineArgs),

    /// Extract style tokens from a live page
    Scrape(scrape::ScrapeArgs),

    /// List components declared in a CSS, script or JSON file
    Parse(parse::ParseArgs),

    /// Manage saved design systems
    #[command(subcommand)]
    DesignSystem(design_system::DesignSystemCommands),

    /// Show recent design briefs
    History(history::HistoryArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.redis_url).await,
            Commands::Generate(args) => design::generate(args).await,
            Commands::Refine(args) => design::refine(args).await,
            Commands::Scrape(args) => scrape::execute(args).await,
            Commands::Parse(args) => parse::execute(args),
            Commands::DesignSystem(cmd) => design_system::execute(cmd, &self.redis_url).await,
            Commands::History(args) => history::execute(args, &self.redis_url).await,
        }
    }
}

pub(crate) async fn connect_store(redis_url: &str) -> Result<RedisStore> {
    Ok(RedisStore::connect(redis_url).await?)
}
