//! Prompt history handlers.

use axum::extract::{Query, State};
use axum::Json;
use dzhr_core::history::{self, model::PromptHistoryEntry};
use serde::Deserialize;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Kept as text so a malformed value falls back to the default.
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SavePromptRequest {
    pub prompt: String,
}

pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<PromptHistoryEntry>>> {
    let limit = query.limit.and_then(|l| l.trim().parse::<usize>().ok());
    let prompts = history::recent_prompts(state.prompts.as_ref(), limit).await?;
    Ok(Json(prompts))
}

pub async fn save_prompt(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SavePromptRequest>,
) -> ApiResult<Json<PromptHistoryEntry>> {
    let entry = history::save_prompt(state.prompts.as_ref(), &req.prompt).await?;
    Ok(Json(entry))
}
