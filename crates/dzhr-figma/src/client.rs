//! Model Context Protocol client over a line-delimited byte stream.

use std::process::Stdio;
use std::time::Duration;

use dzhr_core::{DzhrError, DzhrResult};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

use crate::protocol::{
    JSONRPC_VERSION, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, MCP_PROTOCOL_VERSION,
};

/// Bound on one request/response exchange. The first `npx` run downloads
/// the server package, so this is generous.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const SERVER_PACKAGE: &str = "figma-developer-mcp";

const CLIENT_NAME: &str = "dzhr-figma-client";

fn transport_error(e: impl std::fmt::Display) -> DzhrError {
    DzhrError::DesignTool(format!("MCP transport: {}", e))
}

/// A client speaking MCP over any reader/writer pair.
pub struct McpClient<R, W> {
    lines: Lines<BufReader<R>>,
    writer: W,
    next_id: u64,
    timeout: Duration,
}

impl<R, W> McpClient<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
            next_id: 1,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn write_line(&mut self, line: String) -> DzhrResult<()> {
        self.writer.write_all(line.as_bytes()).await.map_err(transport_error)?;
        self.writer.write_all(b"\n").await.map_err(transport_error)?;
        self.writer.flush().await.map_err(transport_error)
    }

    /// Send a request and wait for its response, skipping anything else
    /// the server says in between.
    pub async fn request(&mut self, method: &str, params: Option<Value>) -> DzhrResult<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let request = JsonRpcRequest { jsonrpc: JSONRPC_VERSION, id, method, params };
        self.write_line(serde_json::to_string(&request)?).await?;
        debug!(id, method, "MCP request sent");

        let limit = self.timeout;
        tokio::time::timeout(limit, self.read_response(id))
            .await
            .map_err(|_| DzhrError::DesignTool(format!("MCP request {} timed out after {:?}", method, limit)))?
    }

    async fn read_response(&mut self, id: u64) -> DzhrResult<Value> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(transport_error)?
                .ok_or_else(|| transport_error("server closed the stream"))?;
            if line.trim().is_empty() {
                continue;
            }

            let message: JsonRpcMessage = match serde_json::from_str(&line) {
                Ok(m) => m,
                Err(e) => {
                    debug!(error = %e, "Ignoring non-JSON line from MCP server");
                    continue;
                }
            };
            if !message.answers(id) {
                continue;
            }
            if let Some(error) = message.error {
                return Err(DzhrError::DesignTool(format!(
                    "{} (code {})",
                    error.message, error.code
                )));
            }
            return Ok(message.result.unwrap_or(Value::Null));
        }
    }

    pub async fn notify(&mut self, method: &str, params: Option<Value>) -> DzhrResult<()> {
        let notification = JsonRpcNotification { jsonrpc: JSONRPC_VERSION, method, params };
        self.write_line(serde_json::to_string(&notification)?).await
    }

    /// Perform the `initialize` handshake.
    pub async fn initialize(&mut self) -> DzhrResult<Value> {
        let result = self
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": { "name": CLIENT_NAME, "version": env!("CARGO_PKG_VERSION") },
                })),
            )
            .await?;
        self.notify("notifications/initialized", None).await?;
        Ok(result)
    }

    pub async fn list_tools(&mut self) -> DzhrResult<Value> {
        self.request("tools/list", None).await
    }

    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> DzhrResult<Value> {
        self.request("tools/call", Some(json!({ "name": name, "arguments": arguments })))
            .await
    }
}

/// A Figma MCP server running as a child process.
pub struct FigmaMcpProcess {
    client: McpClient<ChildStdout, ChildStdin>,
    _child: Child,
}

impl FigmaMcpProcess {
    /// Start the server through `npx` and complete the handshake.
    pub async fn spawn(api_key: &str) -> DzhrResult<Self> {
        let mut child = Command::new("npx")
            .arg("-y")
            .arg(SERVER_PACKAGE)
            .arg(format!("--figma-api-key={}", api_key))
            .arg("--stdio")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DzhrError::DesignTool(format!("failed to start {}: {}", SERVER_PACKAGE, e)))?;

        let stdin = child.stdin.take().ok_or_else(|| transport_error("no stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| transport_error("no stdout"))?;
        let mut client = McpClient::new(stdout, stdin);
        client.initialize().await?;
        info!("Figma MCP server connected");

        Ok(Self { client, _child: child })
    }

    pub fn client(&mut self) -> &mut McpClient<ChildStdout, ChildStdin> {
        &mut self.client
    }
}
