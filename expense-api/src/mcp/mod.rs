//! Tool gateway: exposes the record store as MCP tools, one resource and two prompts.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod tools;

pub use protocol::{JsonRpcRequest, JsonRpcResponse, McpError};

use crate::database::AsyncDbConnection;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use tools::ToolError;
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "ExpenseTracker";

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
    #[serde(default)]
    arguments: Map<String, Value>,
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, McpError> {
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}

pub struct McpServer {
    conn: AsyncDbConnection,
    categories_path: PathBuf,
}

impl McpServer {
    pub fn new(conn: AsyncDbConnection, categories_path: PathBuf) -> Self {
        Self {
            conn,
            categories_path,
        }
    }

    /// Handle one JSON-RPC message. Notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Received notification");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        if let Some(version) = request.jsonrpc.as_deref() {
            if version != protocol::JSONRPC_VERSION {
                let err = McpError::InvalidRequest(format!("unsupported jsonrpc version {version}"));
                return Some(JsonRpcResponse::failure(id, &err));
            }
        }

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(err) => {
                warn!(method = %request.method, error = %err, "MCP request failed");
                Some(JsonRpcResponse::failure(id, &err))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_definitions() })),
            "tools/call" => self.call_tool(parse_params(params)?).await,
            "resources/list" => Ok(json!({ "resources": resources::resource_definitions() })),
            "resources/read" => self.read_resource(parse_params(params)?).await,
            "prompts/list" => Ok(json!({ "prompts": prompts::prompt_definitions() })),
            "prompts/get" => self.get_prompt(parse_params(params)?),
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(|v| v.as_str())
            .unwrap_or(protocol::LATEST_PROTOCOL_VERSION);

        info!(protocol_version, "MCP client initialized");

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
                "prompts": { "listChanged": false },
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    async fn call_tool(&self, params: CallToolParams) -> Result<Value, McpError> {
        info!(tool = %params.name, "Tool call");

        match tools::call_tool(self.conn.clone(), &params.name, params.arguments).await {
            Ok(value) => {
                let text = serde_json::to_string(&value)
                    .map_err(|e| McpError::Internal(e.to_string()))?;
                let structured = if value.is_object() {
                    value
                } else {
                    json!({ "result": value })
                };
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "structuredContent": structured,
                    "isError": false,
                }))
            }
            Err(ToolError::UnknownTool(name)) => {
                Err(McpError::InvalidParams(format!("Unknown tool: {name}")))
            }
            Err(err) => {
                warn!(tool = %params.name, error = %err, "Tool call failed");
                Ok(json!({
                    "content": [{ "type": "text", "text": err.to_string() }],
                    "isError": true,
                }))
            }
        }
    }

    async fn read_resource(&self, params: ReadResourceParams) -> Result<Value, McpError> {
        if params.uri != resources::CATEGORIES_URI {
            return Err(McpError::ResourceNotFound(params.uri));
        }

        let text = resources::read_categories(&self.categories_path)
            .await
            .map_err(|e| {
                McpError::Internal(format!(
                    "Failed to read {}: {}",
                    self.categories_path.display(),
                    e
                ))
            })?;

        Ok(json!({
            "contents": [{
                "uri": resources::CATEGORIES_URI,
                "mimeType": resources::CATEGORIES_MIME_TYPE,
                "text": text,
            }]
        }))
    }

    fn get_prompt(&self, params: GetPromptParams) -> Result<Value, McpError> {
        let text = prompts::render_prompt(&params.name, &params.arguments)?;
        let description = prompts::prompt_definitions()
            .into_iter()
            .find(|p| p.name == params.name)
            .map(|p| p.description)
            .unwrap_or_default();

        Ok(json!({
            "description": description,
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": text },
            }]
        }))
    }
}
