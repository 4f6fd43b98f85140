//! The `auto_linear` request chain.
//!
//! Open a session with the Linear MCP server, list issues, pick one, fetch
//! its comments and hand back an [`OutputRecord`]. The two remote calls are
//! strictly ordered; the session is closed on every exit path.

use std::future::Future;
use std::sync::Arc;

use reqwest::Url;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, IssueFilters, LinearConfig, OutputRecord};
use crate::domain::ports::{McpConnector, McpError, McpSession};
use crate::services::issue_selector;

/// Remote tool listing issues.
pub const LIST_ISSUES_TOOL: &str = "list_issues";
/// Remote tool listing the comments of one issue.
pub const LIST_COMMENTS_TOOL: &str = "list_comments";

/// Orchestrates one `auto_linear` invocation per [`run`](Self::run) call.
///
/// Holds no per-invocation state, so one instance can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct AutoLinearService {
    connector: Arc<dyn McpConnector>,
    config: LinearConfig,
}

impl AutoLinearService {
    pub fn new(connector: Arc<dyn McpConnector>, config: LinearConfig) -> Self {
        Self { connector, config }
    }

    /// Session URL: base URL plus `profile` and `api_key` query parameters.
    ///
    /// Fails with [`DomainError::Configuration`] when no API key is set.
    pub fn session_url(&self) -> DomainResult<Url> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DomainError::Configuration(
                    "LINEAR_API_KEY environment variable is not set. Please check your .env file."
                        .to_string(),
                )
            })?;

        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("profile", self.config.profile.as_str()),
                ("api_key", api_key),
            ],
        )
        .map_err(|e| {
            DomainError::Configuration(format!(
                "Invalid Linear base URL '{}': {e}",
                self.config.base_url
            ))
        })
    }

    /// Run the full chain for one invocation.
    pub async fn run(&self, filters: IssueFilters) -> DomainResult<OutputRecord> {
        let url = self.session_url()?;

        info!(base_url = %self.config.base_url, "Opening Linear MCP session");
        let session = self
            .bounded("session open", self.connector.connect(url.as_str()))
            .await?;

        let result = self.run_in_session(session.as_ref(), filters).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close Linear MCP session");
        }

        result
    }

    async fn run_in_session(
        &self,
        session: &dyn McpSession,
        filters: IssueFilters,
    ) -> DomainResult<OutputRecord> {
        let tools = self.bounded("tools/list", session.list_tools()).await?;
        for required in [LIST_ISSUES_TOOL, LIST_COMMENTS_TOOL] {
            if !tools.iter().any(|tool| tool == required) {
                return Err(McpError::ToolNotFound(required.to_string()).into());
            }
        }

        let filters = filters.with_default_assignee(self.config.default_assignee());
        let payload = self
            .call_json(session, LIST_ISSUES_TOOL, filters.to_arguments())
            .await?;
        let issues = parse_issues(payload)?;
        if issues.is_empty() {
            return Err(DomainError::NoIssuesFound);
        }
        info!(count = issues.len(), "Fetched issues");

        let selection = issue_selector::select(&issues, filters.project_hint())?;
        info!(issue_id = %selection.issue_id, "Fetching comments for selected issue");

        let payload = self
            .call_json(
                session,
                LIST_COMMENTS_TOOL,
                json!({ "issueId": selection.issue_id }),
            )
            .await?;
        let comments = unwrap_list(payload, "comments", LIST_COMMENTS_TOOL)?;
        debug!(count = comments.len(), "Fetched comments");

        Ok(OutputRecord::assemble(selection.description, comments))
    }

    /// Call a remote tool and decode the JSON in its first text block.
    async fn call_json(
        &self,
        session: &dyn McpSession,
        tool: &str,
        arguments: Value,
    ) -> Result<Value, McpError> {
        debug!(tool, arguments = %arguments, "Calling remote tool");
        let response = self.bounded(tool, session.call_tool(tool, arguments)).await?;

        if response.is_error {
            let detail = response.first_text().unwrap_or("no error detail");
            return Err(McpError::ExecutionFailed(format!("{tool}: {detail}")));
        }

        let text = response
            .first_text()
            .ok_or_else(|| McpError::InvalidResponse(format!("{tool} returned no text content")))?;

        serde_json::from_str(text)
            .map_err(|e| McpError::InvalidResponse(format!("{tool} returned invalid JSON: {e}")))
    }

    async fn bounded<T, F>(&self, what: &str, fut: F) -> Result<T, McpError>
    where
        F: Future<Output = Result<T, McpError>>,
    {
        tokio::time::timeout(self.config.request_timeout(), fut)
            .await
            .map_err(|_| McpError::Timeout(what.to_string()))?
    }
}

fn parse_issues(payload: Value) -> DomainResult<Vec<Issue>> {
    unwrap_list(payload, "issues", LIST_ISSUES_TOOL)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(DomainError::from))
        .collect()
}

/// Accept a bare array, `null`, or an object wrapping the array under `key`
/// or a GraphQL-style `nodes` field.
fn unwrap_list(payload: Value, key: &str, tool: &str) -> DomainResult<Vec<Value>> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            if map.is_empty() {
                return Ok(Vec::new());
            }
            match map.remove(key).or_else(|| map.remove("nodes")) {
                Some(Value::Array(items)) => Ok(items),
                Some(Value::Null) => Ok(Vec::new()),
                _ => Err(DomainError::RemoteCall(format!(
                    "{tool} returned an object without a '{key}' list"
                ))),
            }
        }
        other => Err(DomainError::RemoteCall(format!(
            "{tool} returned unexpected payload: {other}"
        ))),
    }
}
