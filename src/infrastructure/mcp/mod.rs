//! MCP (Model Context Protocol) infrastructure module
//!
//! - `RmcpConnector` - client side of the streamable HTTP transport, used
//!   to reach the hosted Linear MCP server

pub mod client;

pub use client::{RmcpConnector, RmcpSession};
