//! MCP client for the hosted Linear server
//!
//! Wraps an `rmcp` client running over the streamable HTTP transport behind
//! the [`McpConnector`] / [`McpSession`] ports. Protocol handling (session
//! ids, event-stream framing, pagination) is left to `rmcp`; this module
//! only maps its results and errors into the domain types.
//!
//! The session URL carries the Linear API key as a query parameter, so every
//! error message built here passes through [`SecretScrubber`] first.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use autolinear::domain::ports::McpConnector;
//! use autolinear::infrastructure::mcp::RmcpConnector;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connector = RmcpConnector::new(Duration::from_secs(30))?;
//!     let session = connector
//!         .connect("https://server.smithery.ai/linear/mcp?profile=p&api_key=k")
//!         .await?;
//!
//!     println!("{:?}", session.list_tools().await?);
//!     let issues = session.call_tool("list_issues", json!({ "limit": 5 })).await?;
//!     println!("{:?}", issues.first_text());
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, ClientInfo, Implementation};
use rmcp::service::RunningService;
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::{Peer, RoleClient, ServiceError, ServiceExt};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::ports::mcp_client::{McpConnector, McpError, McpSession, McpToolResponse};
use crate::infrastructure::logging::SecretScrubber;

const CLIENT_NAME: &str = "autolinear";

/// Opens [`RmcpSession`]s over streamable HTTP.
#[derive(Debug, Clone)]
pub struct RmcpConnector {
    http: reqwest::Client,
    scrubber: SecretScrubber,
}

impl RmcpConnector {
    /// Build a connector whose TCP/TLS connects give up after
    /// `connect_timeout`.
    ///
    /// No overall request timeout is set on the HTTP client: the session
    /// keeps a long-lived event stream open. Callers bound each step
    /// themselves.
    pub fn new(connect_timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            scrubber: SecretScrubber::new(),
        })
    }

    fn client_info() -> ClientInfo {
        ClientInfo {
            client_info: Implementation {
                name: CLIENT_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[async_trait]
impl McpConnector for RmcpConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn McpSession>, McpError> {
        let transport = StreamableHttpClientTransport::with_client(
            self.http.clone(),
            StreamableHttpClientTransportConfig::with_uri(url.to_string()),
        );

        let running = Self::client_info().serve(transport).await.map_err(|e| {
            McpError::ConnectionError(self.scrubber.scrub_message(&e.to_string()))
        })?;

        if let Some(server) = running.peer_info() {
            tracing::debug!(
                server = %server.server_info.name,
                protocol_version = ?server.protocol_version,
                "MCP session initialized"
            );
        }

        Ok(Box::new(RmcpSession {
            peer: running.peer().clone(),
            running: Mutex::new(Some(running)),
            scrubber: self.scrubber,
        }))
    }
}

/// One initialized session with a remote MCP server.
pub struct RmcpSession {
    peer: Peer<RoleClient>,
    running: Mutex<Option<RunningService<RoleClient, ClientInfo>>>,
    scrubber: SecretScrubber,
}

impl RmcpSession {
    fn map_error(&self, operation: &str, error: ServiceError) -> McpError {
        match error {
            ServiceError::McpError(data) => {
                McpError::JsonRpcError(format!("{operation}: {}", data.message))
            }
            other => McpError::ConnectionError(
                self.scrubber
                    .scrub_message(&format!("{operation}: {other}")),
            ),
        }
    }
}

#[async_trait]
impl McpSession for RmcpSession {
    async fn list_tools(&self) -> Result<Vec<String>, McpError> {
        let tools = self
            .peer
            .list_all_tools()
            .await
            .map_err(|e| self.map_error("tools/list", e))?;

        tracing::debug!(tool_count = tools.len(), "Received tools list");
        Ok(tools.into_iter().map(|tool| tool.name.to_string()).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResponse, McpError> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(McpError::ExecutionFailed(format!(
                    "{name}: arguments must be a JSON object, got {other}"
                )))
            }
        };

        let result = self
            .peer
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await
            .map_err(|e| self.map_error(name, e))?;

        // Read the wire shape so optional fields keep their protocol defaults.
        let result = serde_json::to_value(&result)
            .map_err(|e| McpError::InvalidResponse(format!("{name}: {e}")))?;
        let content = result
            .get("content")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let is_error = result
            .get("isError")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(McpToolResponse { content, is_error })
    }

    async fn close(&self) -> Result<(), McpError> {
        let Some(running) = self.running.lock().await.take() else {
            return Ok(());
        };

        let reason = running
            .cancel()
            .await
            .map_err(|e| McpError::ConnectionError(format!("session shutdown: {e}")))?;
        tracing::debug!(?reason, "MCP session closed");
        Ok(())
    }
}
