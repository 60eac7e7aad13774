use crate::mcp::{JsonRpcRequest, JsonRpcResponse, McpError, McpServer};
use actix_web::{web, HttpResponse};
use serde_json::Value;
use std::sync::Arc;

/// `POST /mcp`: one JSON-RPC message per request, answered with a JSON body
pub async fn handle_mcp(server: web::Data<Arc<McpServer>>, body: web::Bytes) -> HttpResponse {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Rejected malformed MCP message: {}", e);
            let err = McpError::Parse(e.to_string());
            return HttpResponse::Ok().json(JsonRpcResponse::failure(Value::Null, &err));
        }
    };

    let id = message.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected invalid MCP request: {}", e);
            let err = McpError::InvalidRequest(e.to_string());
            return HttpResponse::Ok().json(JsonRpcResponse::failure(id, &err));
        }
    };

    match server.handle(request).await {
        Some(response) => HttpResponse::Ok().json(response),
        None => HttpResponse::Accepted().finish(),
    }
}

/// The gateway never pushes server-initiated messages, so there is no SSE stream to open
pub async fn stream_not_supported() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}
