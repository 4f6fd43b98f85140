pub mod mcp_client;

pub use mcp_client::{McpConnector, McpError, McpSession, McpToolResponse};
