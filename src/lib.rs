//! autolinear - Linear issue picker exposed as MCP tools
//!
//! Serves two tools to MCP clients: `auto_linear`, which fetches issues from
//! the hosted Linear MCP server, picks the most urgent one and returns its
//! description with its comment thread, and `save_file`, which writes text
//! to a local Markdown file. A usage prompt is offered alongside.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Models, errors and the MCP client port
//! - **Service Layer** (`services`): Selection policy, the `auto_linear` chain, file writer
//! - **Infrastructure Layer** (`infrastructure`): Config, logging, `rmcp` client for Linear
//! - **Adapters** (`adapters`): `rmcp` tool server over HTTP and stdio
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::mcp::{McpHttpServer, StdioServer, ToolHost, ToolOutcome, ToolServer};
pub use domain::models::{
    Config, Issue, IssueFilters, LinearConfig, LoggingConfig, OutputRecord, Priority,
    SelectionResult, ServerConfig, Transport,
};
pub use domain::ports::{McpConnector, McpError, McpSession, McpToolResponse};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::AutoLinearService;
