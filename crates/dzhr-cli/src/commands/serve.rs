//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dzhr_core::config::AppConfig;
use dzhr_core::store::{DesignSystemStore, MemoryStore, PromptHistoryStore};
use dzhr_figma::FigmaService;
use dzhr_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Keep design systems and prompt history in memory instead of Redis
    #[arg(long)]
    pub memory: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to .dzhr/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

type Stores = (Arc<dyn DesignSystemStore>, Arc<dyn PromptHistoryStore>, String);

fn stores<S>(store: Arc<S>, label: &str) -> Stores
where
    S: DesignSystemStore + PromptHistoryStore + 'static,
{
    (store.clone(), store, label.to_string())
}

pub async fn execute(args: ServeArgs, redis_url: &str) -> Result<()> {
    let config = AppConfig::from_env()?;

    let (design_systems, prompts, storage) = if args.memory {
        stores(Arc::new(MemoryStore::new()), "in-memory")
    } else {
        stores(Arc::new(super::connect_store(redis_url).await?), redis_url)
    };

    let extractor = Arc::new(dzhr_scraper::chromium_extractor(
        config.chromium_path.clone(),
        config.browser_no_sandbox,
    ));
    let figma = Arc::new(FigmaService::new(config.figma_api_key.clone()));
    info!(storage = %storage, figma = figma.is_configured(), model = %config.model, "Server configured");
    let figma_status = if figma.is_configured() { "enabled".green() } else { "disabled".dimmed() };
    let model_status = if config.openai_api_key.is_some() {
        config.model.normal()
    } else {
        warn!("OPENAI_API_KEY is not set; generation, refinement and AI analysis will fail");
        "disabled (OPENAI_API_KEY not set)".dimmed()
    };

    let state = AppState::new(
        config.text_generator(),
        extractor,
        design_systems,
        prompts,
        figma,
        config.generation_options(),
    );

    println!();
    println!("  {} {}", "DZHR".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}      http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}    {}", "Model".green(), model_status);
    println!("  {}  {}", "Storage".green(), storage);
    println!("  {}    {}", "Figma".green(), figma_status);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    dzhr_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}
