//! Prompt history queries. Append-only.
//!
//! Layout:
//! - `dzhr:prompt:{id}` hash, field `data` holds the JSON row
//! - `dzhr:prompts:all` sorted set of ids scored by append sequence
//! - `dzhr:prompts:seq` counter issuing that sequence

use crate::KEY_PREFIX;
use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRow {
    pub id: String,
    pub prompt: String,
    pub created_at: String,
}

fn row_key(id: &str) -> String {
    format!("{}:prompt:{}", KEY_PREFIX, id)
}

fn index_key() -> String {
    format!("{}:prompts:all", KEY_PREFIX)
}

fn seq_key() -> String {
    format!("{}:prompts:seq", KEY_PREFIX)
}

pub async fn save_prompt(pool: &RedisPool, id: &str, prompt: &str) -> RedisResult<PromptRow> {
    let now = chrono::Utc::now();
    let row = PromptRow {
        id: id.to_string(),
        prompt: prompt.to_string(),
        created_at: now.to_rfc3339(),
    };

    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(row_key(id), "data", serde_json::to_string(&row)?)
        .await?;
    // Timestamps tie within a millisecond; the counter never does.
    let seq: i64 = conn.incr(seq_key(), 1).await?;
    conn.zadd::<_, _, _, ()>(index_key(), id, seq).await?;

    Ok(row)
}

/// Most recent prompts first, at most `limit` entries.
pub async fn recent_prompts(pool: &RedisPool, limit: usize) -> RedisResult<Vec<PromptRow>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut conn = pool.clone();
    let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
    let ids: Vec<String> = conn.zrevrange(index_key(), 0, stop).await?;

    let mut prompts = Vec::with_capacity(ids.len());
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(row_key(&id), "data").await?;
        if let Some(j) = json {
            match serde_json::from_str::<PromptRow>(&j) {
                Ok(row) => prompts.push(row),
                Err(e) => tracing::warn!(id = %id, error = %e, "Skipping unreadable prompt row"),
            }
        }
    }
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_share_prefix() {
        assert_eq!(row_key("abc"), "dzhr:prompt:abc");
        assert_eq!(index_key(), "dzhr:prompts:all");
        assert_eq!(seq_key(), "dzhr:prompts:seq");
    }

    #[tokio::test]
    #[ignore = "needs a Redis server at REDIS_URL"]
    async fn test_rapid_appends_stay_in_order() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let pool = crate::init_pool(&url).await.unwrap();
        let run = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let ids: Vec<String> = (0..20).map(|i| format!("order-{run}-{i}")).collect();
        for id in &ids {
            save_prompt(&pool, id, id).await.unwrap();
        }

        let recent = recent_prompts(&pool, ids.len()).await.unwrap();
        let got: Vec<&str> = recent.iter().map(|r| r.id.as_str()).collect();
        let want: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
        assert_eq!(got, want);
    }
}
