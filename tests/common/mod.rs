//! Common test utilities for integration tests
//!
//! An in-memory stand-in for the hosted Linear MCP server, recording every
//! call made against it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use autolinear::adapters::mcp::{ToolHost, ToolServer};
use autolinear::domain::models::LinearConfig;
use autolinear::domain::ports::{McpConnector, McpError, McpSession, McpToolResponse};
use autolinear::services::AutoLinearService;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceExt};
use serde_json::{json, Value};

pub const TEST_API_KEY: &str = "lin_api_testkey123";

/// Scripted behaviour of the fake server.
pub struct FakeLinear {
    pub tools: Vec<String>,
    pub issues: Value,
    pub comments: Value,
    pub issues_error: bool,
    pub call_delay: Option<Duration>,
    pub calls: Mutex<Vec<(String, Value)>>,
    pub connected_url: Mutex<Option<String>>,
    pub connects: AtomicUsize,
    pub closed: AtomicBool,
}

impl FakeLinear {
    pub fn new(issues: Value, comments: Value) -> Self {
        Self {
            tools: vec!["list_issues".to_string(), "list_comments".to_string()],
            issues,
            comments,
            issues_error: false,
            call_delay: None,
            calls: Mutex::new(Vec::new()),
            connected_url: Mutex::new(None),
            connects: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct FakeConnector(pub Arc<FakeLinear>);

#[async_trait]
impl McpConnector for FakeConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn McpSession>, McpError> {
        self.0.connects.fetch_add(1, Ordering::SeqCst);
        *self.0.connected_url.lock().unwrap() = Some(url.to_string());
        Ok(Box::new(FakeSession(self.0.clone())))
    }
}

struct FakeSession(Arc<FakeLinear>);

fn text_response(payload: &Value, is_error: bool) -> McpToolResponse {
    McpToolResponse {
        content: vec![json!({ "type": "text", "text": payload.to_string() })],
        is_error,
    }
}

#[async_trait]
impl McpSession for FakeSession {
    async fn list_tools(&self) -> Result<Vec<String>, McpError> {
        Ok(self.0.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResponse, McpError> {
        self.0
            .calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));

        if let Some(delay) = self.0.call_delay {
            tokio::time::sleep(delay).await;
        }

        match name {
            "list_issues" => Ok(text_response(&self.0.issues, self.0.issues_error)),
            "list_comments" => Ok(text_response(&self.0.comments, false)),
            other => Err(McpError::ToolNotFound(other.to_string())),
        }
    }

    async fn close(&self) -> Result<(), McpError> {
        self.0.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn linear_config() -> LinearConfig {
    LinearConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        ..LinearConfig::default()
    }
}

pub fn service(fake: &Arc<FakeLinear>, config: LinearConfig) -> AutoLinearService {
    AutoLinearService::new(Arc::new(FakeConnector(fake.clone())), config)
}

/// Three issues: B is the most urgent, C has no priority.
pub fn three_issues() -> Value {
    json!([
        { "id": "a", "identifier": "ENG-1", "priority": { "value": 3, "name": "Medium" }, "description": "Issue A" },
        { "id": "b", "identifier": "ENG-2", "priority": { "value": 1, "name": "Urgent" }, "description": "Issue B" },
        { "id": "c", "identifier": "ENG-3", "description": "Issue C" }
    ])
}

pub fn tool_server(fake: &Arc<FakeLinear>) -> ToolServer {
    ToolServer::new(ToolHost::new(service(fake, linear_config())))
}

/// An `rmcp` client talking to `server` over an in-memory pipe.
pub async fn connect_in_process(server: ToolServer) -> RunningService<RoleClient, ()> {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        if let Ok(running) = server.serve(server_io).await {
            let _ = running.waiting().await;
        }
    });
    ().serve(client_io).await.unwrap()
}

pub fn call(name: &str, arguments: Value) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.to_string().into(),
        arguments: arguments.as_object().cloned(),
    }
}

/// A tool result in its wire shape.
pub fn wire(result: &CallToolResult) -> Value {
    serde_json::to_value(result).unwrap()
}
