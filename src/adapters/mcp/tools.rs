//! The tools exposed to MCP clients, independent of any transport.
//!
//! Every failure below this boundary is turned into a descriptive result
//! string; nothing escapes to the server loop.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::models::IssueFilters;
use crate::infrastructure::logging::SecretScrubber;
use crate::services::{file_writer, AutoLinearService};

pub const SAVE_SUCCESS: &str = "File saved successfully";

/// Text result of a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub text: String,
    pub structured: Option<Value>,
    pub is_error: bool,
}

impl ToolOutcome {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
            is_error: true,
        }
    }

    /// MCP `CallToolResult`: one text block, plus the structured record
    /// when there is one.
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        let mut result = if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        };
        result.structured_content = self.structured;
        result
    }
}

/// Hosts `auto_linear` and `save_file`.
#[derive(Clone)]
pub struct ToolHost {
    auto_linear: AutoLinearService,
    scrubber: SecretScrubber,
}

impl ToolHost {
    pub fn new(auto_linear: AutoLinearService) -> Self {
        Self {
            auto_linear,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Fetch, select and assemble. Never fails; errors become text.
    pub async fn auto_linear(&self, filters: IssueFilters) -> ToolOutcome {
        match self.auto_linear.run(filters).await {
            Ok(record) => match serde_json::to_value(&record) {
                Ok(structured) => {
                    let text = serde_json::to_string_pretty(&structured)
                        .unwrap_or_else(|_| structured.to_string());
                    ToolOutcome {
                        text,
                        structured: Some(structured),
                        is_error: false,
                    }
                }
                Err(e) => self.auto_linear_failure(DomainError::from(e)),
            },
            Err(DomainError::NoIssuesFound) => {
                tracing::info!("No issues found in Linear");
                ToolOutcome::ok(DomainError::NoIssuesFound.to_string())
            }
            Err(e) => self.auto_linear_failure(e),
        }
    }

    fn auto_linear_failure(&self, error: DomainError) -> ToolOutcome {
        let report = anyhow::Error::new(error);
        let text = self.scrubber.scrub_message(&format!(
            "Error in auto_linear tool: {report}\nDetails: {report:?}"
        ));
        tracing::error!(error = %self.scrubber.scrub_message(&report.to_string()), "auto_linear failed");
        ToolOutcome::error(text)
    }

    /// Persist `file_content` as Markdown. Never fails; errors become text.
    pub async fn save_file(&self, file_name: &str, file_content: &str) -> ToolOutcome {
        match file_writer::write_file(file_name, file_content).await {
            Ok(_) => ToolOutcome::ok(SAVE_SUCCESS),
            Err(e) => {
                tracing::warn!(file_name, error = %e, "save_file failed");
                ToolOutcome::error(format!("Error saving file: {e}"))
            }
        }
    }
}
