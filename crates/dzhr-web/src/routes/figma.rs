//! Figma handlers.

use axum::extract::State;
use axum::Json;
use dzhr_figma::FigmaAnalysis;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaAnalyzeRequest {
    pub file_key: String,
}

pub async fn analyze_file(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FigmaAnalyzeRequest>,
) -> ApiResult<Json<FigmaAnalysis>> {
    let analysis = state.figma.analyze(&req.file_key).await?;
    Ok(Json(analysis))
}

pub async fn list_mcp_tools(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    Ok(Json(state.figma.list_tools().await?))
}
