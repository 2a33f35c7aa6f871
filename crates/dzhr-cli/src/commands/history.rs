//! Prompt history command.

use anyhow::Result;
use clap::Args;
use dzhr_core::history;

use crate::output;

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of briefs to show
    #[arg(long, default_value = "20")]
    pub limit: usize,
}

pub async fn execute(args: HistoryArgs, redis_url: &str) -> Result<()> {
    let store = super::connect_store(redis_url).await?;
    let entries = history::recent_prompts(&store, Some(args.limit)).await?;
    output::print_prompt_history(&entries);
    Ok(())
}
