//! Adapters exposing the services to the outside world.

pub mod mcp;
