//! MCP over stdin/stdout, one JSON-RPC message per line.
//!
//! The `rmcp` line codec closes the transport on the first line it cannot
//! decode, which would take the whole host down with it. Input therefore
//! passes through [`screen_line`] before it reaches the service: a line that
//! is not UTF-8, not JSON, or not a message the service can decode is
//! answered here with a JSON-RPC error and dropped. Replies from both sides
//! are merged line by line onto the output.

use anyhow::{anyhow, Context, Result};
use rmcp::model::ClientJsonRpcMessage;
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::adapters::mcp::server::ToolServer;

/// JSON-RPC: invalid JSON.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC: not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC: unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC: known method, unusable params.
pub const INVALID_PARAMS: i64 = -32602;

const PIPE_CAPACITY: usize = 64 * 1024;

/// Request methods a client may send to an MCP server.
const CLIENT_REQUEST_METHODS: &[&str] = &[
    "initialize",
    "ping",
    "tools/list",
    "tools/call",
    "prompts/list",
    "prompts/get",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "completion/complete",
    "logging/setLevel",
];

/// What to do with one input line.
#[derive(Debug, PartialEq)]
pub enum Screened {
    /// Hand the (trimmed) message to the service.
    Forward(String),
    /// Answer directly with this error frame.
    Reply(Value),
    /// Blank line or an undecodable notification.
    Skip,
}

/// Classify one raw input line.
pub fn screen_line(line: &[u8]) -> Screened {
    let Ok(text) = std::str::from_utf8(line) else {
        return Screened::Reply(error_frame(
            Value::Null,
            PARSE_ERROR,
            "Parse error: input is not valid UTF-8",
        ));
    };
    let text = text.trim();
    if text.is_empty() {
        return Screened::Skip;
    }

    if serde_json::from_str::<ClientJsonRpcMessage>(text).is_ok() {
        return Screened::Forward(text.to_string());
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            return Screened::Reply(error_frame(
                Value::Null,
                PARSE_ERROR,
                &format!("Parse error: {e}"),
            ))
        }
    };

    let method = value.get("method").and_then(Value::as_str);
    let Some(id) = value.get("id").filter(|id| !id.is_null()).cloned() else {
        // Notifications never get an answer, even broken ones.
        if method.is_some() {
            debug!(method, "Dropping undecodable notification");
            return Screened::Skip;
        }
        return Screened::Reply(error_frame(Value::Null, INVALID_REQUEST, "Invalid request"));
    };

    let (code, message) = match method {
        Some(m) if CLIENT_REQUEST_METHODS.contains(&m) => {
            (INVALID_PARAMS, format!("Invalid params for {m}"))
        }
        Some(m) => (METHOD_NOT_FOUND, format!("Method not found: {m}")),
        None => (INVALID_REQUEST, "Invalid request".to_string()),
    };
    Screened::Reply(error_frame(id, code, &message))
}

fn error_frame(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}

/// Stdio MCP server.
pub struct StdioServer {
    server: ToolServer,
}

impl StdioServer {
    pub fn new(server: ToolServer) -> Self {
        Self { server }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run(self) -> Result<()> {
        info!("Serving MCP on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve on arbitrary streams until `input` reaches EOF.
    pub async fn serve<R, W>(self, input: R, output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (to_service, service_in) = tokio::io::duplex(PIPE_CAPACITY);
        let (service_out, from_service) = tokio::io::duplex(PIPE_CAPACITY);
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();

        let writer = tokio::spawn(write_frames(frames_rx, output));
        let relay = tokio::spawn(relay_frames(BufReader::new(from_service), frames_tx.clone()));
        let guard = tokio::spawn(guard_input(input, to_service, frames_tx));

        let running = match self.server.serve((service_in, service_out)).await {
            Ok(running) => running,
            Err(e) => {
                guard.abort();
                return Err(anyhow!("MCP handshake on stdio failed: {e}"));
            }
        };
        let reason = running.waiting().await.context("stdio MCP service failed")?;
        debug!(?reason, "stdio MCP service stopped");

        // The service may stop while stdin is still open.
        if guard.is_finished() {
            guard.await.context("stdin reader panicked")??;
        } else {
            guard.abort();
        }
        relay.await.context("response relay panicked")??;
        writer.await.context("stdout writer panicked")??;
        Ok(())
    }
}

/// Screen each input line; forward the good ones to the service.
async fn guard_input<R>(
    mut input: R,
    mut service: DuplexStream,
    replies: mpsc::UnboundedSender<Vec<u8>>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        match screen_line(&line) {
            Screened::Forward(message) => {
                let mut frame = message.into_bytes();
                frame.push(b'\n');
                if service.write_all(&frame).await.is_err() {
                    break;
                }
            }
            Screened::Reply(error) => {
                warn!(error = %error["error"]["message"], "Rejected stdio input line");
                let mut frame = serde_json::to_vec(&error)?;
                frame.push(b'\n');
                if replies.send(frame).is_err() {
                    break;
                }
            }
            Screened::Skip => {}
        }
    }

    // EOF for the service
    let _ = service.shutdown().await;
    Ok(())
}

/// Split the service's output into lines for the writer.
async fn relay_frames(
    mut from_service: BufReader<DuplexStream>,
    frames: mpsc::UnboundedSender<Vec<u8>>,
) -> Result<()> {
    loop {
        let mut frame = Vec::new();
        if from_service.read_until(b'\n', &mut frame).await? == 0 {
            return Ok(());
        }
        if !frame.ends_with(b"\n") {
            frame.push(b'\n');
        }
        if frames.send(frame).is_err() {
            return Ok(());
        }
    }
}

/// Sole owner of the output stream.
async fn write_frames<W>(mut frames: mpsc::UnboundedReceiver<Vec<u8>>, mut output: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = frames.recv().await {
        output.write_all(&frame).await?;
        output.flush().await?;
    }
    Ok(())
}
