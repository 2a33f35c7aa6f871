//! Design system types.

use serde::{Deserialize, Serialize};
use dzhr_redis::design_systems::DesignSystemRow;
use tracing::warn;

use crate::design::ComponentReference;

/// A named, persisted collection of component references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystemRecord {
    pub id: String,
    pub name: String,
    pub components: Vec<ComponentReference>,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DesignSystemRecord {
    /// Create from a Redis row.
    pub fn from_row(row: DesignSystemRow) -> Self {
        let components: Vec<ComponentReference> = match serde_json::from_str(&row.components_json) {
            Ok(components) => components,
            Err(e) => {
                warn!(id = %row.id, error = %e, "Stored components are unreadable, listing none");
                Vec::new()
            }
        };

        Self {
            id: row.id,
            name: row.name,
            components,
            source_url: row.source_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields accepted when creating a design system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDesignSystem {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentReference>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Fields accepted when appending to a design system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAppend {
    #[serde(default)]
    pub components: Vec<ComponentReference>,
    #[serde(default)]
    pub source_url: Option<String>,
}
