pub mod config;
pub mod filters;
pub mod issue;

pub use config::{
    Config, LinearConfig, LogFormat, LoggingConfig, RotationPolicy, ServerConfig, Transport,
};
pub use filters::IssueFilters;
pub use issue::{Comment, Issue, OutputRecord, Priority, SelectionResult, NO_DESCRIPTION};
