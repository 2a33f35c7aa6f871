//! Generation and refinement commands.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dzhr_core::config::AppConfig;
use dzhr_core::design::{ConstraintBundle, GeneratedArtifact, StyleTokenSet};
use dzhr_core::extract::validate_scrape_url;
use dzhr_core::generate::DesignOrchestrator;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct ConstraintArgs {
    /// JSON file with style tokens ({colors, fonts, spacing, layouts})
    #[arg(long)]
    pub tokens: Option<PathBuf>,

    /// Design-system documentation URL to follow
    #[arg(long)]
    pub design_system_url: Option<String>,
}

impl ConstraintArgs {
    fn into_bundle(self) -> Result<ConstraintBundle> {
        let mut bundle = ConstraintBundle::default();
        if let Some(path) = self.tokens {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let tokens: StyleTokenSet = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a style token file", path.display()))?;
            debug!(path = %path.display(), "Style tokens loaded");
            bundle = bundle.with_style_tokens(tokens.normalized());
        }
        if let Some(url) = self.design_system_url {
            bundle = bundle.with_design_system_url(validate_scrape_url(&url)?);
        }
        Ok(bundle)
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    /// What to design
    pub brief: String,

    /// Target device: phone, tablet, desktop, watch or vr (can be repeated)
    #[arg(long = "device", short = 'd', required = true)]
    pub devices: Vec<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Write <device>.html files here instead of printing JSON
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct RefineArgs {
    /// JSON file with the current designs ([{device, html, css}])
    #[arg(long)]
    pub designs: PathBuf,

    /// Change to apply
    pub instruction: String,

    /// Only refine these devices (can be repeated)
    #[arg(long = "device", short = 'd')]
    pub devices: Vec<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// Write <device>.html files here instead of printing JSON
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

fn orchestrator() -> Result<DesignOrchestrator> {
    let config = AppConfig::from_env()?;
    config.require_openai_key()?;
    Ok(DesignOrchestrator::new(config.text_generator(), config.generation_options()))
}

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let constraints = args.constraints.into_bundle()?;
    let orchestrator = orchestrator()?;

    eprintln!("{} {}", "Generating".cyan().bold(), args.devices.join(", "));
    let designs = orchestrator.generate(&args.brief, &args.devices, &constraints).await?;
    emit(&designs, args.out.as_deref())
}

pub async fn refine(args: RefineArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.designs)
        .with_context(|| format!("Failed to read {}", args.designs.display()))?;
    let current: Vec<GeneratedArtifact> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a designs file", args.designs.display()))?;
    let constraints = args.constraints.into_bundle()?;
    let orchestrator = orchestrator()?;

    eprintln!("{} {} design(s)", "Refining".cyan().bold(), current.len());
    let designs = orchestrator
        .refine(&current, &args.instruction, &args.devices, &constraints)
        .await?;
    emit(&designs, args.out.as_deref())
}

fn emit(designs: &[GeneratedArtifact], out: Option<&Path>) -> Result<()> {
    match out {
        Some(dir) => {
            for path in output::write_artifacts(dir, designs)? {
                println!("  {} {}", "✓".green(), path.display());
            }
        }
        None => println!("{}", serde_json::to_string_pretty(designs)?),
    }
    Ok(())
}
