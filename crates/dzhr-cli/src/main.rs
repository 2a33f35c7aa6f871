//! DZHR CLI - multi-device UI mockup generator
//!
//! Generates, refines and analyzes designs from the terminal, and launches
//! the web API.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

const DEFAULT_FILTER: &str = "dzhr=info,dzhr_web=debug,dzhr_core=info";

/// Initialize tracing with optional file logging.
///
/// Outside `serve` everything goes to stderr so JSON printed on stdout stays
/// parseable. The returned guard flushes the file writer and must live until
/// exit.
fn init_tracing(log_file: Option<&Path>, serving: bool) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let Some(path) = log_file else {
        if serving {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        return None;
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let _ = std::fs::create_dir_all(dir);
    let file_name = path.file_name().unwrap_or(OsStr::new("serve.log"));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    // Log to both stdout and file when --log is used
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| Path::new(".dzhr").join("serve.log")),
        ),
        _ => None,
    };
    let serving = matches!(&cli.command, Commands::Serve(_));
    let _guard = init_tracing(log_file.as_deref(), serving);

    cli.execute().await
}
