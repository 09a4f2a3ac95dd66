//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication:
//! one request per line on stdin, one response per line on stdout.

use crate::envelope::ResultEnvelope;
use crate::prompts;
use crate::server::{FacebookServer, SERVER_INFO_URI, SERVER_NAME};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required on the wire but not read
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Deserialize)]
struct PromptGetArgs {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ResourceReadArgs {
    uri: String,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.to_string(),
            }),
        }
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

impl From<ResultEnvelope> for ToolResult {
    fn from(envelope: ResultEnvelope) -> Self {
        Self {
            content: vec![ContentItem::text(envelope.text)],
            is_error: envelope.is_error,
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication.
///
/// Requests are handled concurrently; responses are written by a single task
/// in completion order.
pub async fn handle_stdio(server: Arc<FacebookServer>) -> Result<()> {
    info!("Starting {} MCP server on stdio", SERVER_NAME);

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            debug!("Sending response: {}", line);
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    });

    let mut in_flight = JoinSet::new();

    while let Some(line) = reader.next_line().await? {
        while in_flight.try_join_next().is_some() {}

        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let server = server.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            let response = match parse_request(&line) {
                Ok(request) => handle_request(request, &server).await,
                Err(e) => {
                    error!("Failed to parse request: {}", e);
                    Some(McpResponse::error(None, PARSE_ERROR, &format!("Invalid JSON: {}", e)))
                }
            };

            if let Some(response) = response {
                match serialize_response(&response) {
                    Ok(json) => {
                        if tx.send(json).is_err() {
                            warn!("Response writer closed; dropping response");
                        }
                    }
                    Err(e) => error!("Failed to serialize response: {}", e),
                }
            }
        });
    }

    while in_flight.join_next().await.is_some() {}
    drop(tx);
    writer.await??;

    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle a single MCP request. Notifications get no response.
pub async fn handle_request(request: McpRequest, server: &FacebookServer) -> Option<McpResponse> {
    if request.id.is_none() {
        debug!("Notification: {}", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request),
        "ping" => McpResponse::success(request.id, json!({})),
        "tools/list" => handle_tools_list(request, server),
        "tools/call" => handle_tool_call(request, server).await,
        "prompts/list" => handle_prompts_list(request),
        "prompts/get" => handle_prompts_get(request),
        "resources/list" => handle_resources_list(request),
        "resources/read" => handle_resources_read(request, server),
        _ => McpResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            &format!("Method '{}' not found", request.method),
        ),
    };
    Some(response)
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, server: &FacebookServer) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                INVALID_PARAMS,
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    let envelope = server.call_tool(&args.name, args.arguments).await;
    match serde_json::to_value(ToolResult::from(envelope)) {
        Ok(result) => McpResponse::success(request.id, result),
        Err(e) => McpResponse::error(request.id, INTERNAL_ERROR, &e.to_string()),
    }
}

/// Handle tools/list method
fn handle_tools_list(request: McpRequest, server: &FacebookServer) -> McpResponse {
    McpResponse::success(request.id, json!({ "tools": server.list_tools() }))
}

/// Handle initialize method
fn handle_initialize(request: McpRequest) -> McpResponse {
    let params = request
        .params
        .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok());

    let protocol_version = params
        .as_ref()
        .and_then(|p| p.protocol_version.clone())
        .unwrap_or_else(|| PROTOCOL_VERSION.to_string());

    if let Some(client) = params.and_then(|p| p.client_info) {
        info!(
            "Client connected: {} {}",
            client.name.as_deref().unwrap_or("Unknown Client"),
            client.version.as_deref().unwrap_or("")
        );
    }

    let result = json!({
        "protocolVersion": protocol_version,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {},
            "prompts": {},
            "resources": {}
        }
    });
    McpResponse::success(request.id, result)
}

fn handle_prompts_list(request: McpRequest) -> McpResponse {
    McpResponse::success(request.id, json!({ "prompts": &prompts::PROMPTS[..] }))
}

fn handle_prompts_get(request: McpRequest) -> McpResponse {
    let args: PromptGetArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                INVALID_PARAMS,
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    match prompts::find(&args.name) {
        Some(prompt) => McpResponse::success(
            request.id,
            json!({
                "description": prompt.description,
                "messages": [{
                    "role": "user",
                    "content": { "type": "text", "text": prompt.text }
                }]
            }),
        ),
        None => McpResponse::error(
            request.id,
            INVALID_PARAMS,
            &format!("Prompt '{}' not found", args.name),
        ),
    }
}

fn handle_resources_list(request: McpRequest) -> McpResponse {
    McpResponse::success(
        request.id,
        json!({
            "resources": [{
                "uri": SERVER_INFO_URI,
                "name": "server-info",
                "description": "Connection status and available tools for this Facebook Pages MCP server",
                "mimeType": "application/json"
            }]
        }),
    )
}

fn handle_resources_read(request: McpRequest, server: &FacebookServer) -> McpResponse {
    let args: ResourceReadArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                INVALID_PARAMS,
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    if args.uri != SERVER_INFO_URI {
        return McpResponse::error(
            request.id,
            INVALID_PARAMS,
            &format!("Resource '{}' not found", args.uri),
        );
    }

    let text = serde_json::to_string_pretty(&server.server_info()).unwrap_or_default();
    McpResponse::success(
        request.id,
        json!({
            "contents": [{
                "uri": SERVER_INFO_URI,
                "mimeType": "application/json",
                "text": text
            }]
        }),
    )
}
