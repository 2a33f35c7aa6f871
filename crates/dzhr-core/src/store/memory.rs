//! In-process stores.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DesignSystemStore, PromptHistoryStore};
use crate::design::ComponentReference;
use crate::design_system::model::{DesignSystemRecord, NewDesignSystem};
use crate::error::DzhrResult;
use crate::history::model::PromptHistoryEntry;

/// Design systems and prompt history held in memory. Lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    design_systems: RwLock<Vec<DesignSystemRecord>>,
    prompts: RwLock<Vec<PromptHistoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[async_trait]
impl DesignSystemStore for MemoryStore {
    async fn list_design_systems(&self) -> DzhrResult<Vec<DesignSystemRecord>> {
        Ok(self.design_systems.read().await.clone())
    }

    async fn get_design_system(&self, id: &str) -> DzhrResult<Option<DesignSystemRecord>> {
        let systems = self.design_systems.read().await;
        Ok(systems.iter().find(|s| s.id == id).cloned())
    }

    async fn get_design_system_by_name(&self, name: &str) -> DzhrResult<Option<DesignSystemRecord>> {
        let systems = self.design_systems.read().await;
        Ok(systems.iter().find(|s| s.name == name).cloned())
    }

    async fn insert_design_system(&self, new: &NewDesignSystem) -> DzhrResult<DesignSystemRecord> {
        let created_at = now();
        let record = DesignSystemRecord {
            id: Uuid::new_v4().to_string(),
            name: new.name.clone(),
            components: new.components.clone(),
            source_url: new.source_url.clone(),
            updated_at: created_at.clone(),
            created_at,
        };
        self.design_systems.write().await.push(record.clone());
        Ok(record)
    }

    async fn replace_components(
        &self,
        id: &str,
        components: &[ComponentReference],
        source_url: Option<&str>,
    ) -> DzhrResult<Option<DesignSystemRecord>> {
        let mut systems = self.design_systems.write().await;
        let Some(record) = systems.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        record.components = components.to_vec();
        if let Some(url) = source_url {
            record.source_url = Some(url.to_string());
        }
        record.updated_at = now();
        Ok(Some(record.clone()))
    }

    async fn delete_design_system(&self, id: &str) -> DzhrResult<bool> {
        let mut systems = self.design_systems.write().await;
        let before = systems.len();
        systems.retain(|s| s.id != id);
        Ok(systems.len() != before)
    }
}

#[async_trait]
impl PromptHistoryStore for MemoryStore {
    async fn append_prompt(&self, prompt: &str) -> DzhrResult<PromptHistoryEntry> {
        let entry = PromptHistoryEntry {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            created_at: now(),
        };
        self.prompts.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent_prompts(&self, limit: usize) -> DzhrResult<Vec<PromptHistoryEntry>> {
        let prompts = self.prompts.read().await;
        Ok(prompts.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recent_prompts_newest_first() {
        let store = MemoryStore::new();
        for p in ["first", "second", "third"] {
            store.append_prompt(p).await.unwrap();
        }
        let recent = store.recent_prompts(2).await.unwrap();
        let texts: Vec<_> = recent.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(texts, vec!["third", "second"]);
        assert!(store.recent_prompts(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_delete() {
        let store = MemoryStore::new();
        let record = store
            .insert_design_system(&NewDesignSystem { name: "Acme".into(), ..Default::default() })
            .await
            .unwrap();

        let updated = store
            .replace_components(&record.id, &[ComponentReference::new("Button", "")], Some("https://acme.dev"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.components.len(), 1);
        assert_eq!(updated.source_url.as_deref(), Some("https://acme.dev"));

        assert!(store.replace_components("missing", &[], None).await.unwrap().is_none());
        assert!(store.delete_design_system(&record.id).await.unwrap());
        assert!(!store.delete_design_system(&record.id).await.unwrap());
    }
}
