//! Issue, comment and result records exchanged with the Linear MCP server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used when the chosen issue carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Priority attached to an issue.
///
/// Linear's MCP server reports priority as `{ "value": 2, "name": "High" }`;
/// a bare number is accepted as well. Lower values are more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Level(f64),
    Detailed {
        #[serde(default)]
        value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Priority {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Level(value) => Some(*value),
            Self::Detailed { value, .. } => *value,
        }
    }
}

/// An issue as returned by `list_issues`. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque unique identifier
    pub id: String,
    /// Human-readable, project-scoped code such as `ENG-123`
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Issue {
    /// Sort key: the priority value, or positive infinity when absent.
    pub fn priority_rank(&self) -> f64 {
        self.priority
            .as_ref()
            .and_then(Priority::value)
            .unwrap_or(f64::INFINITY)
    }
}

/// A comment attached to an issue, passed through untouched.
pub type Comment = Value;

/// The issue picked for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub issue_id: String,
    pub description: String,
}

impl SelectionResult {
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            issue_id: issue.id.clone(),
            description: issue
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// What `auto_linear` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub issue_description: String,
    pub issue_comments: Vec<Comment>,
}

impl OutputRecord {
    pub fn assemble(issue_description: impl Into<String>, issue_comments: Vec<Comment>) -> Self {
        Self {
            issue_description: issue_description.into(),
            issue_comments,
        }
    }
}
