//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console output on stderr
//! - Optional rolling JSON log files
//! - Secret scrubbing for every log sink and for text returned to tool callers

pub mod logger;
pub mod secret_scrubbing;

pub use logger::{LoggerImpl, LOG_FILE_NAME};
pub use secret_scrubbing::{ScrubbingMakeWriter, SecretScrubber};
