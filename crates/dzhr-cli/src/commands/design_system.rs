//! Design system library commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dzhr_core::codeparse::parse_code_file;
use dzhr_core::design::ComponentReference;
use dzhr_core::design_system::{self, model::NewDesignSystem};
use std::path::PathBuf;

use crate::output;

#[derive(Subcommand)]
pub enum DesignSystemCommands {
    /// List saved design systems
    List,

    /// Save a new design system
    Create(CreateArgs),

    /// Delete a design system by id
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// Unique name
    pub name: String,

    /// Component name (can be repeated)
    #[arg(long = "component", short = 'c')]
    pub components: Vec<String>,

    /// Code file whose declared components are added
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// Documentation URL
    #[arg(long)]
    pub source_url: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Design system id
    pub id: String,
}

pub async fn execute(cmd: DesignSystemCommands, redis_url: &str) -> Result<()> {
    let store = super::connect_store(redis_url).await?;

    match cmd {
        DesignSystemCommands::List => {
            let records = design_system::list_design_systems(&store).await?;
            output::print_design_systems_table(&records);
        }
        DesignSystemCommands::Create(args) => {
            let mut components: Vec<ComponentReference> = args
                .components
                .iter()
                .map(|name| ComponentReference::new(name.as_str(), ""))
                .collect();
            if let Some(path) = &args.from_file {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                components.extend(parse_code_file(&content, &filename).into_iter().map(ComponentReference::from));
            }

            let record = design_system::create_design_system(
                &store,
                NewDesignSystem { name: args.name, components, source_url: args.source_url },
            )
            .await?;
            println!(
                "{} Created design system: {} ({} components)",
                "✓".green().bold(),
                record.name.cyan(),
                record.components.len()
            );
            println!("  {}", record.id.dimmed());
        }
        DesignSystemCommands::Delete(args) => {
            design_system::delete_design_system(&store, &args.id).await?;
            println!("{} Deleted design system {}", "✓".green().bold(), args.id);
        }
    }

    Ok(())
}
