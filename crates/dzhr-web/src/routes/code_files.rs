//! Code-file upload handler.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use dzhr_core::codeparse::{MAX_UPLOAD_BYTES, ParsedComponent, parse_code_file};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct ParsedComponents {
    pub components: Vec<ParsedComponent>,
}

fn too_large() -> ApiError {
    ApiError::Status(StatusCode::PAYLOAD_TOO_LARGE, "File exceeds the 5 MB upload limit".into())
}

/// Parse the multipart field `file`.
pub async fn parse_code_file_upload(mut multipart: Multipart) -> ApiResult<Json<ParsedComponents>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Status(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                ApiError::Status(e.status(), e.body_text())
            }
        })?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(too_large());
        }

        let content = String::from_utf8_lossy(&bytes);
        let components = parse_code_file(&content, &filename);
        info!(filename = %filename, components = components.len(), "Code file parsed");
        return Ok(Json(ParsedComponents { components }));
    }

    Err(ApiError::Status(StatusCode::BAD_REQUEST, "No file uploaded".into()))
}
