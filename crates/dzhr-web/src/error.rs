//! JSON error responses.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dzhr_core::{DzhrError, ErrorClass};
use serde_json::{Value, json};

/// Error returned by every handler, rendered as `{"error", "details"?}`.
#[derive(Debug)]
pub enum ApiError {
    Core(DzhrError),
    /// The request body could not be read as the expected shape.
    InvalidInput(String),
    Status(StatusCode, String),
}

impl From<DzhrError> for ApiError {
    fn from(e: DzhrError) -> Self {
        ApiError::Core(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

fn status_of(e: &DzhrError) -> StatusCode {
    match e.class() {
        ErrorClass::Input => StatusCode::BAD_REQUEST,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_of(e: &DzhrError) -> String {
    match e {
        DzhrError::NameTaken(_) => "Design system with this name already exists".to_string(),
        DzhrError::NotFound(what) => format!("Not found: {}", what),
        other => other.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body): (StatusCode, Value) = match self {
            ApiError::Core(e) => {
                let status = status_of(&e);
                if status.is_server_error() {
                    tracing::error!(error = %e, "Request failed");
                } else {
                    tracing::debug!(error = %e, "Request rejected");
                }
                (status, json!({ "error": message_of(&e) }))
            }
            ApiError::InvalidInput(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid input data", "details": details }),
            ),
            ApiError::Status(status, message) => (status, json!({ "error": message })),
        };
        (status, Json(body)).into_response()
    }
}

/// `Json` extractor whose rejection is an [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub type ApiResult<T> = Result<T, ApiError>;
