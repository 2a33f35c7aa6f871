//! Code-file parsing command.

use anyhow::{Context, Result, bail};
use clap::Args;
use dzhr_core::codeparse::{MAX_UPLOAD_BYTES, parse_code_file};
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct ParseArgs {
    /// CSS, SCSS, LESS, JS, JSX, TS, TSX or JSON file
    pub file: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ParseArgs) -> Result<()> {
    let size = std::fs::metadata(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?
        .len();
    if size > MAX_UPLOAD_BYTES as u64 {
        bail!("{} exceeds the 5 MB limit", args.file.display());
    }

    let bytes = std::fs::read(&args.file)?;
    let content = String::from_utf8_lossy(&bytes);
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let components = parse_code_file(&content, &filename);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&components)?);
    } else {
        output::print_parsed_components(&components);
    }
    Ok(())
}
