//! DZHR Web Server
//!
//! Axum-based JSON API for generation, refinement, analysis and the
//! design-system library.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use dzhr_core::codeparse::MAX_UPLOAD_BYTES;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Room for multipart framing around a maximum-size file.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Generation
        .route("/devices", get(routes::designs::list_devices))
        .route("/generate", post(routes::designs::generate))
        .route("/generate-designs", post(routes::designs::generate))
        .route("/refine", post(routes::designs::refine))
        .route("/refine-designs", post(routes::designs::refine))
        .route("/export-figma", post(routes::designs::export_figma))
        // Analysis
        .route("/analyze-template", post(routes::analysis::analyze_template))
        .route("/analyze-design-system", post(routes::analysis::analyze_design_system))
        // Design systems
        .route(
            "/design-systems",
            get(routes::design_systems::list_design_systems)
                .post(routes::design_systems::create_design_system),
        )
        .route(
            "/design-systems/{id}",
            patch(routes::design_systems::update_design_system)
                .delete(routes::design_systems::delete_design_system),
        )
        // Prompt history
        .route(
            "/prompt-history",
            get(routes::prompts::list_prompts).post(routes::prompts::save_prompt),
        )
        // Uploads
        .route(
            "/parse-code-file",
            post(routes::code_files::parse_code_file_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Figma
        .route("/figma/analyze", post(routes::figma::analyze_file))
        .route("/figma/mcp-tools", get(routes::figma::list_mcp_tools))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
