use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for autolinear
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote Linear MCP server settings
    #[serde(default)]
    pub linear: LinearConfig,

    /// Tool host settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the remote Linear MCP server
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LinearConfig {
    /// Streamable HTTP endpoint of the hosted Linear MCP server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hosting profile passed as the `profile` query parameter
    #[serde(default = "default_profile")]
    pub profile: String,

    /// API key, normally taken from `LINEAR_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Assignee applied to `list_issues` when the caller gives none
    #[serde(default = "default_assignee")]
    pub default_assignee: Option<String>,

    /// Upper bound for opening the session and for each remote call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://server.smithery.ai/linear/mcp".to_string()
}

fn default_profile() -> String {
    "prominent-fox-34SjSm".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_assignee() -> Option<String> {
    Some("me".to_string())
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl LinearConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The default assignee, with an empty override treated as "none".
    pub fn default_assignee(&self) -> Option<&str> {
        self.default_assignee.as_deref().filter(|a| !a.is_empty())
    }
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            api_key: None,
            default_assignee: default_assignee(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for LinearConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearConfig")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_assignee", &self.default_assignee)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Transport the tool host speaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// MCP streamable HTTP
    #[default]
    Http,
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
}

/// Tool host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route serving the MCP endpoint
    #[serde(default = "default_path")]
    pub path: String,

    /// HTTP sessions idle this long are closed; 0 keeps them until `DELETE`
    #[serde(default = "default_session_idle_timeout_secs")]
    pub session_idle_timeout_secs: u64,
}

impl ServerConfig {
    pub fn session_idle_timeout(&self) -> Option<Duration> {
        (self.session_idle_timeout_secs > 0)
            .then(|| Duration::from_secs(self.session_idle_timeout_secs))
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8001
}

fn default_path() -> String {
    "/mcp".to_string()
}

const fn default_session_idle_timeout_secs() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
            path: default_path(),
            session_idle_timeout_secs: default_session_idle_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
