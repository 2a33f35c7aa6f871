//! Terminal output formatting and artifact files.

use anyhow::{Context, Result};
use colored::Colorize;
use dzhr_core::codeparse::ParsedComponent;
use dzhr_core::design::{DeviceProfile, GeneratedArtifact, StyleTokenSet};
use dzhr_core::design_system::model::DesignSystemRecord;
use dzhr_core::extract::DesignSystemScan;
use dzhr_core::history::model::PromptHistoryEntry;
use std::path::{Path, PathBuf};

/// A standalone HTML page for one artifact with its stylesheet inlined.
///
/// Complete documents get the stylesheet injected before `</head>`; fragments
/// are wrapped in a document sized for the artifact's device.
pub fn render_page(artifact: &GeneratedArtifact) -> String {
    let style = format!("<style>\n{}\n</style>", artifact.css);
    let html = artifact.html.trim();

    if html.to_ascii_lowercase().contains("<html") {
        return match html.find("</head>") {
            Some(idx) => format!("{}{}\n{}", &html[..idx], style, &html[idx..]),
            None => format!("{}\n{}", style, html),
        };
    }

    let (title, width) = match DeviceProfile::find(&artifact.device) {
        Some(device) => (device.name, device.width.to_string()),
        None => (artifact.device.as_str(), "device-width".to_string()),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width={width}, initial-scale=1\">\n\
         <title>{title}</title>\n{style}\n</head>\n<body>\n{html}\n</body>\n</html>\n"
    )
}

/// Write `<device>.html` for every artifact into `dir`.
pub fn write_artifacts(dir: &Path, artifacts: &[GeneratedArtifact]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(format!("{}.html", artifact.device));
        std::fs::write(&path, render_page(artifact))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn print_list(label: &str, values: &[String]) {
    if values.is_empty() {
        println!("{:<12} {}", label.bold(), "none".dimmed());
    } else {
        println!("{:<12} {}", label.bold(), values.join(", "));
    }
}

pub fn print_style_tokens(tokens: &StyleTokenSet) {
    print_list("Colors", &tokens.colors);
    print_list("Fonts", &tokens.fonts);
    print_list("Spacing", &tokens.spacing);
    print_list("Layouts", &tokens.layouts);
}

pub fn print_design_system_scan(scan: &DesignSystemScan) {
    print_list("Components", &scan.components);
    print_list("Colors", &scan.colors);
    print_list("Typography", &scan.typography);
    print_list("Spacing", &scan.spacing);
    print_list("Principles", &scan.principles);
    if !scan.component_links.is_empty() {
        println!();
        println!("{}", "Component pages".bold());
        for link in &scan.component_links {
            println!("  {}", link.dimmed());
        }
    }
}

pub fn print_parsed_components(components: &[ParsedComponent]) {
    if components.is_empty() {
        println!("{}", "No components found.".dimmed());
        return;
    }

    println!("{:<30} {:<20}", "Name", "Type");
    println!("{}", "─".repeat(50));
    for component in components {
        println!("{:<30} {:<20}", truncate(&component.name, 28), component.kind.dimmed());
    }
}

/// Print design systems as a table.
pub fn print_design_systems_table(records: &[DesignSystemRecord]) {
    if records.is_empty() {
        println!("{}", "No design systems found.".dimmed());
        return;
    }

    println!("{:<10} {:<30} {:<12} {:<20}", "ID", "Name", "Components", "Updated");
    println!("{}", "─".repeat(75));
    for record in records {
        println!(
            "{:<10} {:<30} {:<12} {:<20}",
            short_id(&record.id),
            truncate(&record.name, 28).cyan(),
            record.components.len(),
            truncate(&record.updated_at, 19).dimmed()
        );
    }
}

pub fn print_prompt_history(entries: &[PromptHistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No prompts saved yet.".dimmed());
        return;
    }

    for entry in entries {
        println!("{}  {}", truncate(&entry.created_at, 19).dimmed(), truncate(&entry.prompt, 80));
    }
}

fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(idx, _)| &id[..idx])
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max {
        s
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
