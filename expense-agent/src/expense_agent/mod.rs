pub mod agent;
pub mod prompt;

pub use agent::{AgentMode, AgentOutcome, ExpenseAgent, ToolInvocation};
