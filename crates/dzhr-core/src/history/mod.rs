//! Prompt history.

pub mod model;

use tracing::debug;

use crate::error::{DzhrError, DzhrResult};
use crate::store::PromptHistoryStore;
use model::PromptHistoryEntry;

/// Entries returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 20;

/// Record a submitted brief.
pub async fn save_prompt(store: &dyn PromptHistoryStore, prompt: &str) -> DzhrResult<PromptHistoryEntry> {
    if prompt.trim().is_empty() {
        return Err(DzhrError::validation("prompt must not be empty"));
    }
    let entry = store.append_prompt(prompt).await?;
    debug!(id = %entry.id, "Prompt saved");
    Ok(entry)
}

/// Most recent briefs first. A missing or zero limit means [`DEFAULT_LIMIT`].
pub async fn recent_prompts(
    store: &dyn PromptHistoryStore,
    limit: Option<usize>,
) -> DzhrResult<Vec<PromptHistoryEntry>> {
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
    store.recent_prompts(limit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_default_limit() {
        let store = MemoryStore::new();
        for i in 0..25 {
            save_prompt(&store, &format!("brief {i}")).await.unwrap();
        }
        let recent = recent_prompts(&store, None).await.unwrap();
        assert_eq!(recent.len(), DEFAULT_LIMIT);
        assert_eq!(recent[0].prompt, "brief 24");
        assert_eq!(recent_prompts(&store, Some(3)).await.unwrap().len(), 3);
        assert_eq!(recent_prompts(&store, Some(0)).await.unwrap().len(), DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(save_prompt(&store, " ").await, Err(DzhrError::Validation(_))));
    }
}
