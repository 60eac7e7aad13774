use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{CallToolResult, McpClientError, McpToolDescriptor};

const PROTOCOL_VERSION: &str = "2025-06-18";
const SESSION_HEADER: &str = "Mcp-Session-Id";

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListToolsResult {
    #[serde(default)]
    tools: Vec<McpToolDescriptor>,
    #[serde(rename = "nextCursor", default)]
    next_cursor: Option<String>,
}

/// Client for a single MCP server.
///
/// Requests are sent one at a time and wait as long as the server takes;
/// no timeout or retry is applied.
pub struct McpClient {
    server_url: String,
    http_client: reqwest::Client,
    next_id: AtomicU64,
    session_id: RwLock<Option<String>>,
}

impl McpClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            http_client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
            session_id: RwLock::new(None),
        }
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn post(&self, body: &Value) -> Result<reqwest::Response, McpClientError> {
        let mut request = self
            .http_client
            .post(&self.server_url)
            .header("Accept", "application/json, text/event-stream")
            .json(body);

        if let Some(session_id) = self.session_id.read().await.as_ref() {
            request = request.header(SESSION_HEADER, session_id.as_str());
        }

        let response = request.send().await?;

        if let Some(session_id) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            *self.session_id.write().await = Some(session_id.to_string());
        }

        Ok(response)
    }

    /// Send a request and wait for its result
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, McpClientError> {
        let id = self.next_request_id();
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "MCP request");
        let response = self.post(&body).await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(McpClientError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        let parsed = parse_response_body(&content_type, &text)?;
        if let Some(err) = parsed.error {
            return Err(McpClientError::JsonRpc {
                code: err.code,
                message: err.message,
            });
        }
        parsed
            .result
            .ok_or_else(|| McpClientError::InvalidResponse(format!("{method}: missing result")))
    }

    /// Send a notification; the server acknowledges without a body
    pub async fn notify(&self, method: &str, params: Value) -> Result<(), McpClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        });
        let response = self.post(&body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(McpClientError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Protocol handshake: `initialize` followed by `notifications/initialized`
    pub async fn initialize(&self) -> Result<Value, McpClientError> {
        let result = self
            .call(
                "initialize",
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "expense-agent",
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            )
            .await?;

        self.notify("notifications/initialized", json!({})).await?;
        Ok(result)
    }

    pub async fn list_tools(&self) -> Result<Vec<McpToolDescriptor>, McpClientError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let result = self.call("tools/list", params).await?;
            let page: ListToolsResult = serde_json::from_value(result)
                .map_err(|e| McpClientError::InvalidResponse(format!("tools/list: {e}")))?;

            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        Ok(tools)
    }

    pub async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, McpClientError> {
        let result = self
            .call(
                "tools/call",
                json!({
                    "name": tool_name,
                    "arguments": arguments,
                }),
            )
            .await?;

        serde_json::from_value(result)
            .map_err(|e| McpClientError::InvalidResponse(format!("tools/call: {e}")))
    }
}

/// Decode a JSON-RPC reply sent either as plain JSON or as an SSE stream
fn parse_response_body(content_type: &str, body: &str) -> Result<JsonRpcResponse, McpClientError> {
    if content_type.contains("text/event-stream") {
        for line in body.lines() {
            if let Some(data) = line.strip_prefix("data:") {
                if let Ok(response) = serde_json::from_str::<JsonRpcResponse>(data.trim()) {
                    if response.id.is_some() {
                        return Ok(response);
                    }
                }
            }
        }
        return Err(McpClientError::InvalidResponse(
            "event stream ended without a response".to_string(),
        ));
    }

    serde_json::from_str(body)
        .map_err(|e| McpClientError::InvalidResponse(format!("parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json_body() {
        let parsed = parse_response_body(
            "application/json",
            r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[]}}"#,
        )
        .unwrap();
        assert_eq!(parsed.result.unwrap(), json!({"tools": []}));
    }

    #[test]
    fn test_parse_event_stream_skips_notifications() {
        let body = "event: message\n\
                    data: {\"jsonrpc\":\"2.0\",\"method\":\"notifications/progress\",\"params\":{}}\n\n\
                    event: message\n\
                    data: {\"jsonrpc\":\"2.0\",\"id\":3,\"error\":{\"code\":-32601,\"message\":\"nope\"}}\n\n";

        let parsed = parse_response_body("text/event-stream", body).unwrap();
        let err = parsed.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "nope");
    }

    #[test]
    fn test_parse_event_stream_without_response() {
        let err = parse_response_body("text/event-stream", ": keep-alive\n\n").unwrap_err();
        assert!(matches!(err, McpClientError::InvalidResponse(_)));
    }
}
