use async_trait::async_trait;
use serde_json::Value;

use super::ToolExecutor;
use crate::mcp::{McpClient, McpClientError, McpToolDescriptor};

#[async_trait]
impl ToolExecutor for McpClient {
    async fn list_tools(&self) -> anyhow::Result<Vec<McpToolDescriptor>> {
        Ok(McpClient::list_tools(self).await?)
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<String> {
        let result = McpClient::call_tool(self, name, arguments).await?;
        let text = result.text();

        if result.is_error {
            return Err(McpClientError::ToolFailed {
                tool: name.to_string(),
                message: text,
            }
            .into());
        }

        Ok(text)
    }
}
