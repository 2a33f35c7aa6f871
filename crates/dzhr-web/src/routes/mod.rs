//! Route handlers.

pub mod analysis;
pub mod code_files;
pub mod design_systems;
pub mod designs;
pub mod figma;
pub mod prompts;
