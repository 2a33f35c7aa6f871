//! Redis-backed stores.

use async_trait::async_trait;
use dzhr_redis::{RedisPool, design_systems as ds_queries, prompt_history as prompt_queries};
use tracing::debug;
use uuid::Uuid;

use super::{DesignSystemStore, PromptHistoryStore};
use crate::design::ComponentReference;
use crate::design_system::model::{DesignSystemRecord, NewDesignSystem};
use crate::error::DzhrResult;
use crate::history::model::PromptHistoryEntry;

/// Both stores over one Redis connection manager.
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and wrap the connection.
    pub async fn connect(url: &str) -> DzhrResult<Self> {
        let pool = dzhr_redis::init_pool(url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DesignSystemStore for RedisStore {
    async fn list_design_systems(&self) -> DzhrResult<Vec<DesignSystemRecord>> {
        let rows = ds_queries::list_design_systems(&self.pool).await?;
        Ok(rows.into_iter().map(DesignSystemRecord::from_row).collect())
    }

    async fn get_design_system(&self, id: &str) -> DzhrResult<Option<DesignSystemRecord>> {
        let row = ds_queries::get_design_system(&self.pool, id).await?;
        Ok(row.map(DesignSystemRecord::from_row))
    }

    async fn get_design_system_by_name(&self, name: &str) -> DzhrResult<Option<DesignSystemRecord>> {
        let row = ds_queries::get_design_system_by_name(&self.pool, name).await?;
        Ok(row.map(DesignSystemRecord::from_row))
    }

    async fn insert_design_system(&self, new: &NewDesignSystem) -> DzhrResult<DesignSystemRecord> {
        let id = Uuid::new_v4().to_string();
        let components_json = serde_json::to_string(&new.components)?;
        let row = ds_queries::create_design_system(
            &self.pool,
            &id,
            &new.name,
            &components_json,
            new.source_url.as_deref(),
        )
        .await?;
        debug!(id = %id, name = %new.name, "Design system stored");
        Ok(DesignSystemRecord::from_row(row))
    }

    async fn replace_components(
        &self,
        id: &str,
        components: &[ComponentReference],
        source_url: Option<&str>,
    ) -> DzhrResult<Option<DesignSystemRecord>> {
        let components_json = serde_json::to_string(components)?;
        let row = ds_queries::update_design_system(&self.pool, id, &components_json, source_url).await?;
        Ok(row.map(DesignSystemRecord::from_row))
    }

    async fn delete_design_system(&self, id: &str) -> DzhrResult<bool> {
        Ok(ds_queries::delete_design_system(&self.pool, id).await?)
    }
}

#[async_trait]
impl PromptHistoryStore for RedisStore {
    async fn append_prompt(&self, prompt: &str) -> DzhrResult<PromptHistoryEntry> {
        let id = Uuid::new_v4().to_string();
        let row = prompt_queries::save_prompt(&self.pool, &id, prompt).await?;
        Ok(PromptHistoryEntry::from_row(row))
    }

    async fn recent_prompts(&self, limit: usize) -> DzhrResult<Vec<PromptHistoryEntry>> {
        let rows = prompt_queries::recent_prompts(&self.pool, limit).await?;
        Ok(rows.into_iter().map(PromptHistoryEntry::from_row).collect())
    }
}
