//! DZHR Figma Integration
//!
//! Talks to a Figma MCP server over stdio and turns its tool results into
//! component references.

pub mod client;
pub mod components;
pub mod protocol;

use dzhr_core::design::ComponentReference;
use dzhr_core::{DzhrError, DzhrResult};
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub use client::{FigmaMcpProcess, McpClient};
pub use components::extract_components;

/// Components and raw styles of one Figma file.
#[derive(Debug, Clone, Serialize)]
pub struct FigmaAnalysis {
    pub components: Vec<ComponentReference>,
    pub styles: Value,
}

/// Lazily connected, process-wide Figma MCP session.
///
/// The server is started on first use and reused afterwards. A transport
/// failure drops the session so the next call starts a fresh one.
pub struct FigmaService {
    api_key: Option<String>,
    session: Mutex<Option<FigmaMcpProcess>>,
}

impl FigmaService {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            session: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> DzhrResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DzhrError::config("FIGMA_API_KEY environment variable is not set"))
    }

    /// Run `op` against the shared session, connecting first when needed.
    async fn with_session<T, F>(&self, op: F) -> DzhrResult<T>
    where
        F: for<'a> FnOnce(&'a mut FigmaMcpProcess) -> BoxFuture<'a, DzhrResult<T>>,
    {
        let api_key = self.api_key()?;
        let mut guard = self.session.lock().await;
        if guard.is_none() {
            *guard = Some(FigmaMcpProcess::spawn(api_key).await?);
        }
        let Some(process) = guard.as_mut() else {
            return Err(DzhrError::DesignTool("MCP session unavailable".into()));
        };

        let result = op(process).await;
        if let Err(DzhrError::DesignTool(ref message)) = result {
            if message.starts_with("MCP transport") {
                warn!(error = %message, "Dropping Figma MCP session");
                *guard = None;
            }
        }
        result
    }

    /// Fetch components and styles of `file_key`.
    pub async fn analyze(&self, file_key: &str) -> DzhrResult<FigmaAnalysis> {
        let file_key = file_key.trim();
        if file_key.is_empty() {
            return Err(DzhrError::validation("fileKey must not be empty"));
        }
        let key = file_key.to_string();
        let (components_result, styles) = self
            .with_session(move |process| {
                Box::pin(async move {
                    let args = json!({ "file_key": key });
                    let components = process.client().call_tool("get_components", args.clone()).await?;
                    let styles = process.client().call_tool("get_styles", args).await?;
                    Ok::<_, DzhrError>((components, styles))
                })
            })
            .await?;

        let components = extract_components(&components_result, file_key);
        info!(file_key, components = components.len(), "Figma file analyzed");
        Ok(FigmaAnalysis { components, styles })
    }

    /// The tool list advertised by the MCP server.
    pub async fn list_tools(&self) -> DzhrResult<Value> {
        self.with_session(|process| Box::pin(async move { process.client().list_tools().await }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_a_config_error() {
        let service = FigmaService::new(Some("  ".into()));
        assert!(!service.is_configured());
        let err = service.list_tools().await.unwrap_err();
        assert!(matches!(err, DzhrError::Config(ref m) if m.contains("FIGMA_API_KEY")));
    }

    #[tokio::test]
    async fn test_blank_file_key_rejected() {
        let service = FigmaService::new(Some("figd_test".into()));
        let err = service.analyze(" ").await.unwrap_err();
        assert!(matches!(err, DzhrError::Validation(_)));
    }
}
