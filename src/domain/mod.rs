//! Domain layer for autolinear
//!
//! Records exchanged with the Linear MCP server, configuration, error types
//! and the port traits the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
