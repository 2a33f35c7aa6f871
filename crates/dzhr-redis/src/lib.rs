//! DZHR Redis Data Layer
//!
//! Async Redis persistence for named design systems and the prompt history log.

pub mod client;
pub mod queries;

pub use client::{RedisError, RedisPool, RedisResult, init_pool};
pub use queries::design_systems;
pub use queries::prompt_history;

/// Prefix shared by every key this crate writes.
pub const KEY_PREFIX: &str = "dzhr";
