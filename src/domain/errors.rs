//! Domain errors for autolinear.

use thiserror::Error;

use crate::domain::ports::mcp_client::McpError;

/// Domain-level errors that can occur while serving a tool invocation.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No issues found in Linear")]
    NoIssuesFound,

    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<McpError> for DomainError {
    fn from(err: McpError) -> Self {
        DomainError::RemoteCall(err.to_string())
    }
}
