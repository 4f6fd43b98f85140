//! Implementation of the `autolinear run` command.
//!
//! One `auto_linear` call followed by `save_file`, without an MCP client in
//! between. The outcome is always saved, including "no issues" and errors.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::adapters::mcp::ToolOutcome;
use crate::cli::commands::build_tool_host;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, IssueFilters};
use crate::services::file_writer::normalize_path;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Maximum number of issues to fetch
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Identifier of the issue to pick, e.g. ENG-123
    #[arg(long)]
    pub project: Option<String>,

    /// Assignee filter (defaults to the configured assignee)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Output file; the extension is replaced with .md
    #[arg(short, long, default_value = "issues.json")]
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub success: bool,
    pub message: String,
    pub comment_count: usize,
    pub saved_to: PathBuf,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        format!(
            "{} ({} comment(s)) -> {}",
            self.message,
            self.comment_count,
            self.saved_to.display()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let host = build_tool_host(&config.linear)?;

    let filters = IssueFilters {
        limit: args.limit,
        project: args.project,
        assignee: args.assignee,
        ..IssueFilters::default()
    };

    let fetched = host.auto_linear(filters).await;

    // The result is saved whatever it is, failures included.
    let file_name = args.output.to_string_lossy();
    let saved = host.save_file(&file_name, &saved_content(&fetched)).await;
    if saved.is_error {
        bail!("{}", saved.text);
    }
    if fetched.is_error {
        bail!("{}", fetched.text);
    }

    let comment_count = fetched
        .structured
        .as_ref()
        .and_then(|record| record.get("issue_comments"))
        .and_then(serde_json::Value::as_array)
        .map_or(0, Vec::len);

    output(
        &RunOutput {
            success: true,
            message: if fetched.structured.is_some() {
                saved.text
            } else {
                fetched.text
            },
            comment_count,
            saved_to: normalize_path(&file_name),
        },
        json_mode,
    );
    Ok(())
}

/// What gets written: the pretty record, or a bare message as a JSON string.
fn saved_content(fetched: &ToolOutcome) -> String {
    if fetched.structured.is_some() {
        return fetched.text.clone();
    }
    serde_json::to_string(&fetched.text).unwrap_or_else(|_| fetched.text.clone())
}
