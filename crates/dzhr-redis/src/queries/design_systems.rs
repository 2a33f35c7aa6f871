//! Design system queries.
//!
//! Layout:
//! - `dzhr:design_system:{id}` hash, field `data` holds the JSON row
//! - `dzhr:design_systems:all` sorted set of ids scored by creation time
//! - `dzhr:design_system_name:{name}` string pointing at the owning id

use crate::KEY_PREFIX;
use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSystemRow {
    pub id: String,
    pub name: String,
    /// JSON array of `{name, url}` objects.
    pub components_json: String,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn row_key(id: &str) -> String {
    format!("{}:design_system:{}", KEY_PREFIX, id)
}

fn index_key() -> String {
    format!("{}:design_systems:all", KEY_PREFIX)
}

fn name_key(name: &str) -> String {
    format!("{}:design_system_name:{}", KEY_PREFIX, name)
}

async fn write_row(pool: &RedisPool, row: &DesignSystemRow) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(row_key(&row.id), "data", serde_json::to_string(row)?)
        .await?;
    Ok(())
}

/// Insert a new design system. Name uniqueness is the caller's concern;
/// the name index is overwritten unconditionally.
pub async fn create_design_system(
    pool: &RedisPool,
    id: &str,
    name: &str,
    components_json: &str,
    source_url: Option<&str>,
) -> RedisResult<DesignSystemRow> {
    let now = chrono::Utc::now();
    let row = DesignSystemRow {
        id: id.to_string(),
        name: name.to_string(),
        components_json: components_json.to_string(),
        source_url: source_url.map(str::to_string),
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    };

    write_row(pool, &row).await?;

    let mut conn = pool.clone();
    conn.zadd::<_, _, _, ()>(index_key(), id, now.timestamp_millis()).await?;
    conn.set::<_, _, ()>(name_key(name), id).await?;

    Ok(row)
}

pub async fn get_design_system(pool: &RedisPool, id: &str) -> RedisResult<Option<DesignSystemRow>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(row_key(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

pub async fn get_design_system_by_name(
    pool: &RedisPool,
    name: &str,
) -> RedisResult<Option<DesignSystemRow>> {
    let mut conn = pool.clone();
    let id: Option<String> = conn.get(name_key(name)).await?;
    match id {
        Some(id) => get_design_system(pool, &id).await,
        None => Ok(None),
    }
}

/// List all design systems in creation order.
pub async fn list_design_systems(pool: &RedisPool) -> RedisResult<Vec<DesignSystemRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(index_key(), 0, -1).await?;
    let mut systems = Vec::with_capacity(ids.len());
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(row_key(&id), "data").await?;
        if let Some(j) = json {
            match serde_json::from_str::<DesignSystemRow>(&j) {
                Ok(row) => systems.push(row),
                Err(e) => tracing::warn!(id = %id, error = %e, "Skipping unreadable design system row"),
            }
        }
    }
    Ok(systems)
}

/// Replace the stored components array and, when given, the source URL.
/// Returns `None` when the id is unknown.
pub async fn update_design_system(
    pool: &RedisPool,
    id: &str,
    components_json: &str,
    source_url: Option<&str>,
) -> RedisResult<Option<DesignSystemRow>> {
    let Some(mut row) = get_design_system(pool, id).await? else {
        return Ok(None);
    };
    row.components_json = components_json.to_string();
    if let Some(url) = source_url {
        row.source_url = Some(url.to_string());
    }
    row.updated_at = chrono::Utc::now().to_rfc3339();
    write_row(pool, &row).await?;
    Ok(Some(row))
}

/// Delete a design system. Returns `false` when nothing was stored under `id`.
pub async fn delete_design_system(pool: &RedisPool, id: &str) -> RedisResult<bool> {
    let Some(row) = get_design_system(pool, id).await? else {
        return Ok(false);
    };

    let mut conn = pool.clone();
    conn.del::<_, ()>(row_key(id)).await?;
    conn.zrem::<_, _, ()>(index_key(), id).await?;

    let owner: Option<String> = conn.get(name_key(&row.name)).await?;
    if owner.as_deref() == Some(id) {
        conn.del::<_, ()>(name_key(&row.name)).await?;
    }

    Ok(true)
}
