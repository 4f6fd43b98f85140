//! MCP tool host.
//!
//! Exposes `auto_linear`, `save_file` and the `prompt` prompt over
//! streamable HTTP or stdio. Both transports serve the same [`ToolServer`]
//! handler.

pub mod http_server;
pub mod server;
pub mod stdio_server;
pub mod tools;

pub use http_server::McpHttpServer;
pub use server::{ToolServer, SERVER_NAME};
pub use stdio_server::StdioServer;
pub use tools::{ToolHost, ToolOutcome};
