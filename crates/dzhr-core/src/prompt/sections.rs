//! Instruction sections.
//!
//! Each section is a pure function of the [`PromptContext`] that either
//! renders a block of text or returns `None` when it does not apply.

use std::fmt::Write;

use super::rules;
use super::{PromptContext, PromptMode};
use crate::design::StyleTokenSet;

/// A single optional block of a composed instruction.
pub type Section = fn(&PromptContext<'_>) -> Option<String>;

pub const ACCESSIBILITY_HEADER: &str = "### ACCESSIBILITY REQUIREMENTS (NON-NEGOTIABLE)";
pub const STYLE_TOKENS_HEADER: &str = "### STYLE TOKENS (USE EXCLUSIVELY)";
pub const DESIGN_SYSTEM_HEADER: &str = "### DESIGN SYSTEM COMPLIANCE (MANDATORY)";
pub const COMPONENT_CATALOG_HEADER: &str = "### COMPONENT CATALOG";
pub const REFINEMENT_HEADER: &str = "### REFINEMENT RULES";
pub const OUTPUT_CONTRACT_HEADER: &str = "### OUTPUT CONTRACT";

/// Sections of the system instruction, in emission order.
pub const SYSTEM_SECTIONS: &[Section] = &[
    role,
    accessibility,
    style_tokens,
    design_system_reference,
    component_catalog,
    refinement_rules,
    output_contract,
];

/// Sections of the user instruction, in emission order.
pub const USER_SECTIONS: &[Section] = &[
    brief,
    current_design,
    design_process,
    device_target,
    final_checklist,
];

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bulleted<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn role(ctx: &PromptContext<'_>) -> Option<String> {
    let device = ctx.device;
    let text = match ctx.mode {
        PromptMode::Create => format!(
            "You are a senior product designer and front-end engineer who creates \
             production-ready, accessible interfaces in plain HTML and CSS.\n\
             Create a complete design for a {} viewport ({}x{}px).\n\n\
             Quality philosophy:\n\
             - Clarity before decoration: every element earns its place.\n\
             - Consistency: one spacing scale, one type scale, one palette.\n\
             - Accessibility is part of the design, not an afterthought.\n\
             - Real, specific content that fits the brief; never filler text.",
            device.name, device.width, device.height
        ),
        PromptMode::Refine { .. } => format!(
            "You are a senior product designer and front-end engineer refining an \
             existing interface in plain HTML and CSS for a {} viewport ({}x{}px).\n\
             Preserve what works and change only what is requested. The current design \
             is the baseline; your answer must be at least as good as it.",
            device.name, device.width, device.height
        ),
    };
    Some(text)
}

fn accessibility(_ctx: &PromptContext<'_>) -> Option<String> {
    Some(format!(
        "{}\nEvery design MUST satisfy all of the following:\n{}",
        ACCESSIBILITY_HEADER,
        numbered(rules::ACCESSIBILITY_RULES)
    ))
}

fn token_list(out: &mut String, label: &str, values: &[String], primary: bool) {
    let _ = writeln!(out, "{}:", label);
    if values.is_empty() {
        let _ = writeln!(out, "- (not constrained)");
        return;
    }
    for (i, value) in values.iter().enumerate() {
        if primary && i == 0 {
            let _ = writeln!(out, "- {} (primary)", value);
        } else {
            let _ = writeln!(out, "- {}", value);
        }
    }
}

fn render_tokens(tokens: &StyleTokenSet) -> String {
    let mut out = String::new();
    token_list(&mut out, "Colors", &tokens.colors, true);
    token_list(&mut out, "Fonts", &tokens.fonts, true);
    token_list(&mut out, "Spacing", &tokens.spacing, false);
    token_list(&mut out, "Layouts", &tokens.layouts, false);
    out
}

fn style_tokens(ctx: &PromptContext<'_>) -> Option<String> {
    let tokens = ctx.constraints.active_style_tokens()?;
    Some(format!(
        "{}\nThe following values were captured from the reference design. Use ONLY these \
         values. Any color, font family, spacing value or layout idiom that is not listed \
         below is forbidden.\n\n{}\n\
         Rules:\n\
         - The first color is the primary brand color and the first font is the primary typeface.\n\
         - Declare the tokens as CSS custom properties on :root and reference them through var().\n\
         - A category marked \"not constrained\" may use values consistent with the listed ones.\n\
         - Using any value outside this enumeration is a compliance failure.",
        STYLE_TOKENS_HEADER,
        render_tokens(tokens)
    ))
}

fn design_system_reference(ctx: &PromptContext<'_>) -> Option<String> {
    let url = ctx.constraints.active_design_system_url()?;
    Some(format!(
        "{}\nThe design must follow the design system documented at: {}\n{}",
        DESIGN_SYSTEM_HEADER,
        url,
        bulleted(rules::DESIGN_SYSTEM_RULES)
    ))
}

fn component_catalog(ctx: &PromptContext<'_>) -> Option<String> {
    let catalog = &ctx.constraints.component_catalog;
    if catalog.is_empty() {
        return None;
    }
    let entries: Vec<String> = catalog
        .iter()
        .map(|c| {
            if c.url.trim().is_empty() {
                c.name.clone()
            } else {
                format!("{} ({})", c.name, c.url)
            }
        })
        .collect();
    Some(format!(
        "{}\nThe design system provides these components:\n{}\n\
         Build the interface from these components. When the design needs a component that \
         is not listed, visually infer it from the listed ones (same corner radius, elevation, \
         typography, color treatment and spacing) instead of inventing an inconsistent style.",
        COMPONENT_CATALOG_HEADER,
        bulleted(&entries)
    ))
}

fn refinement_rules(ctx: &PromptContext<'_>) -> Option<String> {
    match ctx.mode {
        PromptMode::Refine { .. } => Some(format!(
            "{}\n{}",
            REFINEMENT_HEADER,
            bulleted(rules::PRESERVATION_RULES)
        )),
        PromptMode::Create => None,
    }
}

fn output_contract(_ctx: &PromptContext<'_>) -> Option<String> {
    let [html, css] = rules::OUTPUT_KEYS;
    Some(format!(
        "{}\nRespond with a single JSON object with exactly two string keys:\n\
         {{\"{html}\": \"...\", \"{css}\": \"...\"}}\n\
         - \"{html}\": the complete markup of the page body, self-contained, without <style> or <script> tags.\n\
         - \"{css}\": the complete, modern, responsive stylesheet for that markup.\n\
         - No markdown code fences, no commentary, no text before or after the JSON object.",
        OUTPUT_CONTRACT_HEADER
    ))
}

fn brief(ctx: &PromptContext<'_>) -> Option<String> {
    let label = match ctx.mode {
        PromptMode::Create => "Design brief",
        PromptMode::Refine { .. } => "Refinement request",
    };
    Some(format!("{}:\n{}", label, ctx.brief))
}

fn current_design(ctx: &PromptContext<'_>) -> Option<String> {
    let PromptMode::Refine { current } = ctx.mode else {
        return None;
    };
    Some(format!(
        "Current design for {}. Modify it; do not start over.\n\n\
         CURRENT HTML:\n```html\n{}\n```\n\n\
         CURRENT CSS:\n```css\n{}\n```",
        ctx.device.name, current.html, current.css
    ))
}

fn design_process(ctx: &PromptContext<'_>) -> Option<String> {
    let steps = match ctx.mode {
        PromptMode::Create => rules::CREATE_PROCESS,
        PromptMode::Refine { .. } => rules::REFINE_PROCESS,
    };
    Some(format!(
        "Work through these steps before writing the answer:\n{}",
        numbered(steps)
    ))
}

fn device_target(ctx: &PromptContext<'_>) -> Option<String> {
    let d = ctx.device;
    Some(format!(
        "Target device: {} at exactly {}x{}px. The layout must fit a {}px-wide viewport \
         without horizontal scrolling, and the first screen is composed for a {}px-tall viewport.",
        d.name, d.width, d.height, d.width, d.height
    ))
}

fn final_checklist(ctx: &PromptContext<'_>) -> Option<String> {
    let mut items: Vec<String> = rules::ACCESSIBILITY_CHECKLIST
        .iter()
        .map(|s| s.to_string())
        .collect();

    if ctx.constraints.active_style_tokens().is_some() {
        items.push("Only the listed style tokens are used".to_string());
    }
    if let Some(url) = ctx.constraints.active_design_system_url() {
        items.push(format!("The design follows the design system at {}", url));
    }
    if !ctx.constraints.component_catalog.is_empty() {
        items.push("Missing components are inferred from the component catalog".to_string());
    }
    if let PromptMode::Refine { .. } = ctx.mode {
        items.push("Only the requested change was made; everything else is preserved".to_string());
    }
    items.push("The response is a single JSON object with exactly the keys \"html\" and \"css\"".to_string());

    Some(format!("Final checklist, confirm every item:\n{}", bulleted(&items)))
}
