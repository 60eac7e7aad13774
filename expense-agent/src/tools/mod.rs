pub mod executor;

use async_trait::async_trait;
use serde_json::Value;

use crate::mcp::McpToolDescriptor;

/// Discovers and runs remote tools on behalf of the agent
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn list_tools(&self) -> anyhow::Result<Vec<McpToolDescriptor>>;

    /// Run one tool and return its textual result. A tool-reported failure is an error.
    async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<String>;
}
