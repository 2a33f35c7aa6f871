//! Query modules for every entity stored in Redis.

pub mod design_systems;
pub mod prompt_history;
