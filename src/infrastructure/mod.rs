//! Infrastructure layer module
//!
//! External integrations and adapters:
//! - MCP client for the hosted Linear server
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod mcp;
