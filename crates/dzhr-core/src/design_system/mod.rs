//! Named design systems.

pub mod model;

use tracing::info;

use crate::design::ComponentReference;
use crate::error::{DzhrError, DzhrResult};
use crate::store::DesignSystemStore;
use model::{ComponentAppend, DesignSystemRecord, NewDesignSystem};

/// List all design systems.
pub async fn list_design_systems(store: &dyn DesignSystemStore) -> DzhrResult<Vec<DesignSystemRecord>> {
    store.list_design_systems().await
}

/// Create a design system, rejecting a name that is already taken.
///
/// The lookup and the insert are separate store calls, so two concurrent
/// creates with the same name can both succeed.
pub async fn create_design_system(
    store: &dyn DesignSystemStore,
    new: NewDesignSystem,
) -> DzhrResult<DesignSystemRecord> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(DzhrError::validation("name must not be empty"));
    }
    if store.get_design_system_by_name(name).await?.is_some() {
        return Err(DzhrError::NameTaken(name.to_string()));
    }

    let new = NewDesignSystem { name: name.to_string(), ..new };
    let record = store.insert_design_system(&new).await?;
    info!(id = %record.id, name = %record.name, components = record.components.len(), "Design system created");
    Ok(record)
}

/// Append components to a design system, keeping existing ones first.
/// Duplicates are kept. Fails with `NotFound` for an unknown id.
pub async fn append_components(
    store: &dyn DesignSystemStore,
    id: &str,
    update: ComponentAppend,
) -> DzhrResult<DesignSystemRecord> {
    let existing = store
        .get_design_system(id)
        .await?
        .ok_or_else(|| DzhrError::NotFound(format!("design system {}", id)))?;

    let added = update.components.len();
    let components: Vec<ComponentReference> = existing
        .components
        .into_iter()
        .chain(update.components)
        .collect();

    let record = store
        .replace_components(id, &components, update.source_url.as_deref())
        .await?
        .ok_or_else(|| DzhrError::NotFound(format!("design system {}", id)))?;
    info!(id, added, total = record.components.len(), "Design system updated");
    Ok(record)
}

/// Delete a design system. Fails with `NotFound` for an unknown id.
pub async fn delete_design_system(store: &dyn DesignSystemStore, id: &str) -> DzhrResult<()> {
    if store.delete_design_system(id).await? {
        info!(id, "Design system deleted");
        Ok(())
    } else {
        Err(DzhrError::NotFound(format!("design system {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn new_system(name: &str, components: &[&str]) -> NewDesignSystem {
        NewDesignSystem {
            name: name.into(),
            components: components.iter().map(|c| ComponentReference::new(*c, "")).collect(),
            source_url: None,
        }
    }

    #[tokio::test]
    async fn test_second_create_with_same_name_rejected() {
        let store = MemoryStore::new();
        create_design_system(&store, new_system("X", &["Button"])).await.unwrap();
        let err = create_design_system(&store, new_system("X", &["Card"])).await.unwrap_err();
        assert!(matches!(err, DzhrError::NameTaken(ref n) if n == "X"));
        assert_eq!(list_design_systems(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = MemoryStore::new();
        let err = create_design_system(&store, new_system("  ", &[])).await.unwrap_err();
        assert!(matches!(err, DzhrError::Validation(_)));
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_duplicates() {
        let store = MemoryStore::new();
        let record = create_design_system(&store, new_system("Acme", &["Button", "Card"])).await.unwrap();

        let update = ComponentAppend {
            components: vec![ComponentReference::new("Card", ""), ComponentReference::new("Modal", "")],
            source_url: Some("https://acme.dev/ds".into()),
        };
        let updated = append_components(&store, &record.id, update).await.unwrap();
        let names: Vec<_> = updated.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Button", "Card", "Card", "Modal"]);
        assert_eq!(updated.source_url.as_deref(), Some("https://acme.dev/ds"));
        assert_eq!(updated.created_at, record.created_at);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let store = MemoryStore::new();
        let err = append_components(&store, "nope", ComponentAppend::default()).await.unwrap_err();
        assert!(matches!(err, DzhrError::NotFound(_)));
        let err = delete_design_system(&store, "nope").await.unwrap_err();
        assert!(matches!(err, DzhrError::NotFound(_)));
    }
}
