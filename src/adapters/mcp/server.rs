//! The MCP server handler shared by the stdio and HTTP transports.
//!
//! # Tools Exposed
//!
//! - `auto_linear` - Pick the most urgent Linear issue and return its thread
//! - `save_file` - Write text to a local Markdown file
//!
//! # Prompts Exposed
//!
//! - `prompt` - How to chain the two tools

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
    PaginatedRequestParam, Prompt, PromptMessage, PromptMessageRole, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::mcp::tools::ToolHost;
use crate::domain::models::IssueFilters;
use crate::services::prompt::{prompt_text, PROMPT_DESCRIPTION, PROMPT_NAME};

/// Name advertised in `serverInfo`.
pub const SERVER_NAME: &str = "Save Code Tool MCP";

/// Request parameters for `auto_linear`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoLinearRequest {
    /// Cursor: return issues after this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Maximum number of issues to fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor: return issues before this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Sort field, e.g. createdAt or updatedAt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Identifier of a specific issue to process, e.g. ENG-123. Wins over priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Team name or id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Cycle name or id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<String>,
    /// Label name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Workflow state name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Assignee; defaults to the API key owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Parent issue id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Created-at filter (ISO 8601 date or duration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Updated-at filter (ISO 8601 date or duration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Include archived issues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_archived: Option<bool>,
}

impl From<AutoLinearRequest> for IssueFilters {
    fn from(request: AutoLinearRequest) -> Self {
        Self {
            after: request.after,
            limit: request.limit,
            before: request.before,
            order_by: request.order_by,
            project: request.project,
            team: request.team,
            cycle: request.cycle,
            label: request.label,
            query: request.query,
            state: request.state,
            assignee: request.assignee,
            parent_id: request.parent_id,
            created_at: request.created_at,
            updated_at: request.updated_at,
            include_archived: request.include_archived,
        }
    }
}

/// Request parameters for `save_file`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveFileRequest {
    /// Target path; its extension is replaced with .md
    pub file_name: String,
    /// Text to write
    pub file_content: String,
}

/// MCP server exposing the [`ToolHost`] tools and the usage prompt.
#[derive(Clone)]
pub struct ToolServer {
    tools: ToolHost,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ToolServer {
    pub fn new(tools: ToolHost) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Fetch issues from Linear, pick the most urgent one (or the one whose identifier matches `project`) and return its description together with its comment thread."
    )]
    async fn auto_linear(
        &self,
        params: Parameters<AutoLinearRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "auto_linear", "Tool call");
        let outcome = self.tools.auto_linear(params.0.into()).await;
        Ok(outcome.into_call_result())
    }

    #[tool(
        description = "Save a file to the local directory. The extension is always replaced with .md."
    )]
    async fn save_file(
        &self,
        params: Parameters<SaveFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;
        info!(tool = "save_file", file_name = %request.file_name, "Tool call");
        let outcome = self
            .tools
            .save_file(&request.file_name, &request.file_content)
            .await;
        Ok(outcome.into_call_result())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some(SERVER_NAME.to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(prompt_text().to_string()),
            ..Default::default()
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(vec![Prompt::new(
            PROMPT_NAME,
            Some(PROMPT_DESCRIPTION),
            None,
        )]))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        if request.name != PROMPT_NAME {
            return Err(McpError::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            ));
        }

        Ok(GetPromptResult {
            description: Some(PROMPT_DESCRIPTION.to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                prompt_text(),
            )],
        })
    }
}
