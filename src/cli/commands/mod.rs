//! Command handlers.

pub mod prompt;
pub mod run;
pub mod serve;

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::mcp::ToolHost;
use crate::domain::models::LinearConfig;
use crate::infrastructure::mcp::RmcpConnector;
use crate::services::AutoLinearService;

/// Wire the tool host to the real Linear MCP server.
pub fn build_tool_host(linear: &LinearConfig) -> Result<ToolHost> {
    let connector = RmcpConnector::new(linear.request_timeout())?;
    let service = AutoLinearService::new(Arc::new(connector), linear.clone());
    Ok(ToolHost::new(service))
}
