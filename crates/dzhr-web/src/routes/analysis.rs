//! Reference-URL analysis handlers.

use axum::extract::State;
use axum::Json;
use dzhr_core::design::StyleTokenSet;
use dzhr_core::extract::DesignSystemScan;
use serde::Deserialize;

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

pub async fn analyze_template(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> ApiResult<Json<StyleTokenSet>> {
    let tokens = state.analyzer.analyze_template(&req.url).await?;
    Ok(Json(tokens))
}

pub async fn analyze_design_system(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> ApiResult<Json<DesignSystemScan>> {
    let scan = state.analyzer.analyze_design_system(&req.url).await?;
    Ok(Json(scan))
}
