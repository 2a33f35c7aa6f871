//! Prompt composition.
//!
//! Turns a design brief, a device and an optional constraint bundle into a
//! deterministic `(system, user)` instruction pair. Composition is total: it
//! performs no I/O and never fails.

pub mod rules;
pub mod sections;

use serde::Serialize;

use crate::design::{ConstraintBundle, DeviceProfile, GeneratedArtifact};
use sections::{Section, SYSTEM_SECTIONS, USER_SECTIONS};

/// A composed system/user instruction pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Whether a prompt creates a new design or modifies an existing one.
#[derive(Debug, Clone, Copy)]
pub enum PromptMode<'a> {
    Create,
    Refine { current: &'a GeneratedArtifact },
}

/// Everything a section may read.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub brief: &'a str,
    pub device: &'a DeviceProfile,
    pub constraints: &'a ConstraintBundle,
    pub mode: PromptMode<'a>,
}

/// Join every section that applies, in order, separated by a blank line.
fn assemble(sections: &[Section], ctx: &PromptContext<'_>) -> String {
    sections
        .iter()
        .filter_map(|section| section(ctx))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn compose(ctx: PromptContext<'_>) -> PromptPair {
    PromptPair {
        system: assemble(SYSTEM_SECTIONS, &ctx),
        user: assemble(USER_SECTIONS, &ctx),
    }
}

/// Compose the instructions for a fresh design.
pub fn compose_generation_prompt(
    brief: &str,
    device: &DeviceProfile,
    constraints: &ConstraintBundle,
) -> PromptPair {
    compose(PromptContext {
        brief,
        device,
        constraints,
        mode: PromptMode::Create,
    })
}

/// Compose the instructions for a targeted edit of `existing`.
pub fn compose_refinement_prompt(
    existing: &GeneratedArtifact,
    brief: &str,
    device: &DeviceProfile,
    constraints: &ConstraintBundle,
) -> PromptPair {
    compose(PromptContext {
        brief,
        device,
        constraints,
        mode: PromptMode::Refine { current: existing },
    })
}

#[cfg(test)]
mod tests {
    use super::sections::*;
    use super::*;
    use crate::design::{ComponentReference, StyleTokenSet};

    fn phone() -> &'static DeviceProfile {
        DeviceProfile::resolve("phone").unwrap()
    }

    fn tokens() -> StyleTokenSet {
        StyleTokenSet::new(
            vec!["#0A84FF".into(), "rgb(17, 17, 17)".into()],
            vec!["Inter".into(), "Georgia".into()],
            vec!["8px".into(), "24px".into()],
            vec!["Grid".into()],
        )
    }

    fn full_bundle() -> ConstraintBundle {
        ConstraintBundle::default()
            .with_style_tokens(tokens())
            .with_design_system_url("https://design.example.com/system")
            .with_component_catalog(vec![
                ComponentReference::new("Primary Button", "https://design.example.com/button"),
                ComponentReference::new("Pricing Card", ""),
            ])
    }

    #[test]
    fn test_composition_is_deterministic() {
        let bundle = full_bundle();
        let a = compose_generation_prompt("Create a pricing page", phone(), &bundle);
        let b = compose_generation_prompt("Create a pricing page", phone(), &bundle);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unconstrained_prompt_has_no_conditional_blocks() {
        let pair = compose_generation_prompt("A login screen", phone(), &ConstraintBundle::default());
        assert!(pair.system.contains(ACCESSIBILITY_HEADER));
        assert!(pair.system.contains(OUTPUT_CONTRACT_HEADER));
        assert!(!pair.system.contains(STYLE_TOKENS_HEADER));
        assert!(!pair.system.contains(DESIGN_SYSTEM_HEADER));
        assert!(!pair.system.contains(COMPONENT_CATALOG_HEADER));
        assert!(!pair.system.contains(REFINEMENT_HEADER));
    }

    #[test]
    fn test_style_tokens_only() {
        let bundle = ConstraintBundle::default().with_style_tokens(tokens());
        let pair = compose_generation_prompt("A login screen", phone(), &bundle);
        assert!(pair.system.contains(STYLE_TOKENS_HEADER));
        assert!(!pair.system.contains(COMPONENT_CATALOG_HEADER));
        assert!(!pair.system.contains(DESIGN_SYSTEM_HEADER));
        assert!(pair.system.contains("- #0A84FF (primary)"));
        assert!(pair.system.contains("- Inter (primary)"));
        assert!(pair.user.contains("Only the listed style tokens are used"));
    }

    #[test]
    fn test_all_constraint_blocks_carry_every_value() {
        let bundle = full_bundle();
        let pair = compose_generation_prompt("A pricing page", phone(), &bundle);

        let style_at = pair.system.find(STYLE_TOKENS_HEADER).unwrap();
        let ds_at = pair.system.find(DESIGN_SYSTEM_HEADER).unwrap();
        let catalog_at = pair.system.find(COMPONENT_CATALOG_HEADER).unwrap();
        let contract_at = pair.system.find(OUTPUT_CONTRACT_HEADER).unwrap();
        assert!(style_at < ds_at && ds_at < catalog_at && catalog_at < contract_at);

        let style_block = &pair.system[style_at..ds_at];
        for value in ["#0A84FF", "rgb(17, 17, 17)", "Inter", "Georgia", "8px", "24px", "Grid"] {
            assert!(style_block.contains(value), "missing token {value}");
        }
        assert!(pair.system[ds_at..catalog_at].contains("https://design.example.com/system"));

        let catalog_block = &pair.system[catalog_at..contract_at];
        assert!(catalog_block.contains("Primary Button (https://design.example.com/button)"));
        assert!(catalog_block.contains("- Pricing Card\n"));
        assert!(catalog_block.contains("visually infer"));
    }

    #[test]
    fn test_accessibility_rules_always_present() {
        let pair = compose_generation_prompt("x", phone(), &ConstraintBundle::default());
        for rule in rules::ACCESSIBILITY_RULES {
            assert!(pair.system.contains(rule));
        }
        for item in rules::ACCESSIBILITY_CHECKLIST {
            assert!(pair.user.contains(item));
        }
    }

    #[test]
    fn test_user_instruction_structure() {
        let desktop = DeviceProfile::resolve("desktop").unwrap();
        let pair = compose_generation_prompt("Create a pricing page", desktop, &ConstraintBundle::default());
        assert!(pair.user.starts_with("Design brief:\nCreate a pricing page"));
        assert!(pair.user.contains("1. Identify the primary user goal"));
        assert!(pair.user.contains("exactly 1440x900px"));
        assert!(pair.user.trim_end().ends_with("exactly the keys \"html\" and \"css\""));
    }

    #[test]
    fn test_refinement_embeds_current_design() {
        let current = GeneratedArtifact {
            device: "phone".into(),
            html: "<main><h1>Plans</h1></main>".into(),
            css: "main { display: grid; color: #111; }".into(),
        };
        let pair = compose_refinement_prompt(&current, "Make the header blue", phone(), &ConstraintBundle::default());

        assert!(pair.user.starts_with("Refinement request:\nMake the header blue"));
        assert!(pair.user.contains(&current.html));
        assert!(pair.user.contains(&current.css));
        assert!(pair.system.contains(REFINEMENT_HEADER));
        assert!(pair.system.contains("Preserve what works"));
        assert!(pair.system.contains("outside the original constraint set"));
        assert!(!pair.system.contains("Create a complete design"));
        assert!(pair.system.contains(ACCESSIBILITY_HEADER));
    }

    #[test]
    fn test_refinement_keeps_constraint_blocks() {
        let current = GeneratedArtifact { device: "phone".into(), html: "<main></main>".into(), css: String::new() };
        let pair = compose_refinement_prompt(&current, "Tighten spacing", phone(), &full_bundle());
        assert!(pair.system.contains(STYLE_TOKENS_HEADER));
        assert!(pair.system.contains(COMPONENT_CATALOG_HEADER));
        assert!(pair.user.contains("Only the requested change was made"));
    }
}
