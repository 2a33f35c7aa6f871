//! Generation, refinement and export handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use dzhr_core::design::{ComponentReference, ConstraintBundle, DEVICES, DeviceProfile, GeneratedArtifact, StyleTokenSet};
use dzhr_core::export::export_designs;
use dzhr_core::extract::validate_scrape_url;
use serde::{Deserialize, Serialize};

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// Constraint fields shared by generation and refinement requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintFields {
    pub design_system_url: Option<String>,
    pub design_system_components: Option<Vec<ComponentReference>>,
    pub template_styles: Option<StyleTokenSet>,
}

impl ConstraintFields {
    fn into_bundle(self) -> ApiResult<ConstraintBundle> {
        let mut bundle = ConstraintBundle::default();
        if let Some(url) = self.design_system_url.filter(|u| !u.trim().is_empty()) {
            validate_scrape_url(&url)?;
            bundle = bundle.with_design_system_url(url);
        }
        if let Some(tokens) = self.template_styles {
            bundle = bundle.with_style_tokens(tokens.normalized());
        }
        if let Some(components) = self.design_system_components {
            bundle = bundle.with_component_catalog(components);
        }
        Ok(bundle)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub devices: Vec<String>,
    #[serde(flatten)]
    pub constraints: ConstraintFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub current_designs: Vec<GeneratedArtifact>,
    pub refinement_prompt: String,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(flatten)]
    pub constraints: ConstraintFields,
}

#[derive(Debug, Serialize)]
pub struct DesignsResponse {
    pub designs: Vec<GeneratedArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub designs: Vec<GeneratedArtifact>,
    pub project_name: String,
}

pub async fn list_devices() -> Json<&'static [DeviceProfile]> {
    Json(&DEVICES[..])
}

pub async fn generate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> ApiResult<Json<DesignsResponse>> {
    let constraints = req.constraints.into_bundle()?;
    let designs = state
        .orchestrator
        .generate(&req.prompt, &req.devices, &constraints)
        .await?;
    Ok(Json(DesignsResponse { designs }))
}

pub async fn refine(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefineRequest>,
) -> ApiResult<Json<DesignsResponse>> {
    let constraints = req.constraints.into_bundle()?;
    let designs = state
        .orchestrator
        .refine(&req.current_designs, &req.refinement_prompt, &req.devices, &constraints)
        .await?;
    Ok(Json(DesignsResponse { designs }))
}

pub async fn export_figma(ApiJson(req): ApiJson<ExportRequest>) -> ApiResult<impl IntoResponse> {
    let export = export_designs(&req.project_name, &req.designs);
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}
