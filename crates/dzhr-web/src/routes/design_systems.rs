//! Design system handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dzhr_core::design_system::{self, model::{ComponentAppend, DesignSystemRecord, NewDesignSystem}};
use serde_json::{Value, json};

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_design_systems(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DesignSystemRecord>>> {
    let systems = design_system::list_design_systems(state.design_systems.as_ref()).await?;
    Ok(Json(systems))
}

pub async fn create_design_system(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewDesignSystem>,
) -> ApiResult<(StatusCode, Json<DesignSystemRecord>)> {
    let record = design_system::create_design_system(state.design_systems.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_design_system(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ComponentAppend>,
) -> ApiResult<Json<DesignSystemRecord>> {
    let record = design_system::append_components(state.design_systems.as_ref(), &id, req).await?;
    Ok(Json(record))
}

pub async fn delete_design_system(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    design_system::delete_design_system(state.design_systems.as_ref(), &id).await?;
    Ok(Json(json!({ "success": true })))
}
