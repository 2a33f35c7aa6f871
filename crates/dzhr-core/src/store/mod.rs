//! Persistence seams for design systems and prompt history.
//!
//! [`RedisStore`] backs the server; [`MemoryStore`] is used by tests and by
//! `serve --memory`.

pub mod memory;
pub mod redis;

use async_trait::async_trait;

use crate::design::ComponentReference;
use crate::design_system::model::{DesignSystemRecord, NewDesignSystem};
use crate::error::DzhrResult;
use crate::history::model::PromptHistoryEntry;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;

/// Storage of named design systems.
#[async_trait]
pub trait DesignSystemStore: Send + Sync {
    /// All design systems in creation order.
    async fn list_design_systems(&self) -> DzhrResult<Vec<DesignSystemRecord>>;

    async fn get_design_system(&self, id: &str) -> DzhrResult<Option<DesignSystemRecord>>;

    async fn get_design_system_by_name(&self, name: &str) -> DzhrResult<Option<DesignSystemRecord>>;

    /// Store a new record under a fresh id. Does not check the name.
    async fn insert_design_system(&self, new: &NewDesignSystem) -> DzhrResult<DesignSystemRecord>;

    /// Overwrite the components array, and the source URL when given.
    async fn replace_components(
        &self,
        id: &str,
        components: &[ComponentReference],
        source_url: Option<&str>,
    ) -> DzhrResult<Option<DesignSystemRecord>>;

    async fn delete_design_system(&self, id: &str) -> DzhrResult<bool>;
}

/// Append-only log of submitted briefs.
#[async_trait]
pub trait PromptHistoryStore: Send + Sync {
    async fn append_prompt(&self, prompt: &str) -> DzhrResult<PromptHistoryEntry>;

    /// Newest first, at most `limit` entries.
    async fn recent_prompts(&self, limit: usize) -> DzhrResult<Vec<PromptHistoryEntry>>;
}
