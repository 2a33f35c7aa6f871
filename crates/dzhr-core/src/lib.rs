//! DZHR Core Library
//!
//! Prompt composition, multi-device generation and refinement, response
//! scoring, style analysis and the design-system domain.

pub mod analysis;
pub mod codeparse;
pub mod config;
pub mod design;
pub mod design_system;
pub mod error;
pub mod export;
pub mod extract;
pub mod generate;
pub mod history;
pub mod llm;
pub mod prompt;
pub mod store;
pub mod validate;

pub use error::{DzhrError, DzhrResult, ErrorClass};
