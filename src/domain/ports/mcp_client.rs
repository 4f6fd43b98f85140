use async_trait::async_trait;
use serde_json::Value;

/// Result of a `tools/call` against a remote MCP server.
#[derive(Debug, Clone, Default)]
pub struct McpToolResponse {
    /// Raw content blocks, in the order the server sent them
    pub content: Vec<Value>,
    /// Whether the server flagged the call as a tool-level failure
    pub is_error: bool,
}

impl McpToolResponse {
    /// Text of the first content block, if it is a text block.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .first()
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
    }
}

/// Error types specific to MCP operations
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("JSON-RPC error: {0}")]
    JsonRpcError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),
}

/// An open session with a remote MCP server.
///
/// Sessions are single-use: open, issue a few calls in order, close.
#[async_trait]
pub trait McpSession: Send + Sync {
    /// Names of the tools the remote server exposes.
    async fn list_tools(&self) -> Result<Vec<String>, McpError>;

    /// Invoke a remote tool by name.
    ///
    /// # Errors
    /// - `McpError::JsonRpcError` - The server answered with a JSON-RPC error
    /// - `McpError::ConnectionError` - Transport failure
    /// - `McpError::InvalidResponse` - Response could not be decoded
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResponse, McpError>;

    /// Terminate the session. Safe to call once per session.
    async fn close(&self) -> Result<(), McpError>;
}

/// Port for acquiring MCP sessions.
#[async_trait]
pub trait McpConnector: Send + Sync {
    /// Open and initialize a session against `url`.
    async fn connect(&self, url: &str) -> Result<Box<dyn McpSession>, McpError>;
}
