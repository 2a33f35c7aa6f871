//! Prompt history types.

use serde::{Deserialize, Serialize};
use dzhr_redis::prompt_history::PromptRow;

/// One saved design brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptHistoryEntry {
    pub id: String,
    pub prompt: String,
    pub created_at: String,
}

impl PromptHistoryEntry {
    /// Create from a Redis row.
    pub fn from_row(row: PromptRow) -> Self {
        Self {
            id: row.id,
            prompt: row.prompt,
            created_at: row.created_at,
        }
    }
}
