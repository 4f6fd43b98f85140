//! Integration tests for the Linear-facing MCP client: error mapping and
//! secret hygiene, against a local tool host and a mock server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use autolinear::adapters::mcp::McpHttpServer;
use autolinear::domain::models::ServerConfig;
use autolinear::domain::ports::{McpConnector, McpError};
use autolinear::infrastructure::mcp::RmcpConnector;
use common::{tool_server, FakeLinear};
use mockito::{Matcher, Server};
use serde_json::json;
use tokio::net::TcpListener;

fn connector() -> RmcpConnector {
    RmcpConnector::new(Duration::from_secs(5)).unwrap()
}

/// Local tool host; its URL carries a credential like the Linear one does.
async fn spawn_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let fake = Arc::new(FakeLinear::new(json!([]), json!([])));
    tokio::spawn(McpHttpServer::new(tool_server(&fake), ServerConfig::default()).serve(listener));
    format!("http://{addr}/mcp?profile=test-profile&api_key=secret")
}

#[tokio::test]
async fn test_connects_with_credentials_in_query() {
    let url = spawn_host().await;

    let session = connector().connect(&url).await.unwrap();
    let tools = session.list_tools().await.unwrap();
    session.close().await.unwrap();

    assert_eq!(tools.len(), 2);
}

#[tokio::test]
async fn test_tool_error_result_is_not_a_call_error() {
    let url = spawn_host().await;

    let session = connector().connect(&url).await.unwrap();
    let response = session
        .call_tool("save_file", json!({ "file_name": "", "file_content": "x" }))
        .await
        .unwrap();
    session.close().await.unwrap();

    assert!(response.is_error);
    assert_eq!(
        response.first_text(),
        Some("Error saving file: File name is required")
    );
}

#[tokio::test]
async fn test_json_rpc_error_is_reported() {
    let url = spawn_host().await;

    let session = connector().connect(&url).await.unwrap();
    let err = session
        .call_tool("save_file", json!({ "file_name": "only a name" }))
        .await
        .unwrap_err();
    session.close().await.unwrap();

    assert!(matches!(err, McpError::JsonRpcError(_)));
    assert!(err.to_string().starts_with("JSON-RPC error: save_file: "));
}

#[tokio::test]
async fn test_non_object_arguments_rejected_locally() {
    let url = spawn_host().await;

    let session = connector().connect(&url).await.unwrap();
    let err = session.call_tool("save_file", json!([1, 2])).await.unwrap_err();
    session.close().await.unwrap();

    assert!(matches!(err, McpError::ExecutionFailed(_)));
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let url = spawn_host().await;

    let session = connector().connect(&url).await.unwrap();
    session.close().await.unwrap();
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_http_failure_does_not_leak_query() {
    let mut server = Server::new_async().await;
    let initialize = server
        .mock("POST", "/mcp")
        .match_query(Matcher::UrlEncoded("api_key".into(), "secret".into()))
        .with_status(401)
        .with_body("unauthorized")
        .expect_at_least(1)
        .create_async()
        .await;

    let url = format!("{}/mcp?profile=test-profile&api_key=secret", server.url());
    let err = match connector().connect(&url).await {
        Ok(_) => panic!("connect should fail on 401"),
        Err(e) => e,
    };

    assert!(matches!(err, McpError::ConnectionError(_)));
    assert!(!err.to_string().contains("secret"));
    initialize.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_does_not_leak_query() {
    let url = "http://127.0.0.1:1/mcp?profile=p&api_key=secret";

    let err = match connector().connect(url).await {
        Ok(_) => panic!("connect should fail"),
        Err(e) => e,
    };

    assert!(matches!(err, McpError::ConnectionError(_)));
    assert!(!err.to_string().contains("secret"));
}
