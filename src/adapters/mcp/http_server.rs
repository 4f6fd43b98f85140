//! MCP streamable HTTP server.
//!
//! `rmcp`'s [`StreamableHttpService`] is mounted on one route (default
//! `/mcp`) and owns the protocol: `initialize` opens a session and returns
//! its id in the `Mcp-Session-Id` header, later POSTs must carry it, and
//! `DELETE` ends it. Sessions that stay idle longer than
//! `server.session_idle_timeout_secs` are closed by the session manager.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapters::mcp::server::ToolServer;
use crate::domain::models::ServerConfig;

/// Streamable HTTP MCP server.
pub struct McpHttpServer {
    config: ServerConfig,
    server: ToolServer,
}

impl McpHttpServer {
    pub fn new(server: ToolServer, config: ServerConfig) -> Self {
        Self { config, server }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let mut sessions = LocalSessionManager::default();
        sessions.session_config.keep_alive = self.config.session_idle_timeout();

        let server = self.server.clone();
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            Arc::new(sessions),
            StreamableHttpServerConfig::default(),
        );

        Router::new()
            .nest_service(&self.config.path, service)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!(address = %addr, path = %self.config.path, "HTTP MCP server listening");

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down HTTP MCP server");
            })
            .await
            .context("HTTP MCP server failed")?;

        Ok(())
    }

    /// Serve on an already-bound listener until the task is dropped.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.build_router())
            .await
            .context("HTTP MCP server failed")?;
        Ok(())
    }
}
