pub mod expense_agent;
pub mod llm;
pub mod mcp;
pub mod tools;

pub use expense_agent::{AgentMode, AgentOutcome, ExpenseAgent, ToolInvocation};
pub use llm::LlmClient;
pub use mcp::McpClient;
pub use tools::ToolExecutor;
