use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use shared_types::DateRangeParams;

use super::prompt::{SMOKE_TEST_END_DATE, SMOKE_TEST_START_DATE};
use crate::llm::{ChatMessage, CompletionRequest, LlmClient, ToolDefinition};
use crate::mcp::McpToolDescriptor;
use crate::tools::ToolExecutor;

/// How the agent runs, decided once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentMode {
    /// No model credential: call list_expenses directly to check connectivity
    SmokeTest,
    Model { api_key: String, model: String },
}

impl AgentMode {
    pub fn select(api_key: Option<String>, model: impl Into<String>) -> Self {
        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(api_key) => AgentMode::Model {
                api_key,
                model: model.into(),
            },
            None => AgentMode::SmokeTest,
        }
    }
}

/// One executed tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: Value,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    SmokeTest {
        output: String,
    },
    Reply {
        content: String,
        invocations: Vec<ToolInvocation>,
        model_rounds: usize,
    },
}

pub struct ExpenseAgent {
    tool_executor: Arc<dyn ToolExecutor>,
}

impl ExpenseAgent {
    pub fn new(tool_executor: Arc<dyn ToolExecutor>) -> Self {
        Self { tool_executor }
    }

    pub async fn discover_tools(&self) -> anyhow::Result<Vec<McpToolDescriptor>> {
        let tools = self.tool_executor.list_tools().await?;
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        tracing::info!("Available tools: {:?}", names);
        Ok(tools)
    }

    pub async fn run_smoke_test(&self) -> anyhow::Result<AgentOutcome> {
        tracing::info!("OPENAI_API_KEY not set, running a direct tool smoke-test");

        let arguments = serde_json::to_value(DateRangeParams {
            start_date: SMOKE_TEST_START_DATE.to_string(),
            end_date: SMOKE_TEST_END_DATE.to_string(),
        })?;
        let output = self
            .tool_executor
            .call_tool("list_expenses", arguments)
            .await
            .context("Smoke-test call to list_expenses failed")?;

        tracing::info!("list_expenses result: {}", output);
        Ok(AgentOutcome::SmokeTest { output })
    }

    /// Ask the model once, run the tools it picks in order, then ask once more with the results.
    ///
    /// The first failing tool call aborts the run; the remaining calls are not attempted.
    pub async fn run_with_model(
        &self,
        llm: &dyn LlmClient,
        model: &str,
        instruction: &str,
        tools: &[McpToolDescriptor],
    ) -> anyhow::Result<AgentOutcome> {
        let tool_definitions: Vec<ToolDefinition> = tools.iter().map(ToolDefinition::from).collect();
        let known_tools: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        let mut messages = vec![ChatMessage::user(instruction)];

        let response = llm
            .complete(CompletionRequest {
                model: model.to_string(),
                messages: messages.clone(),
                tools: tool_definitions.clone(),
            })
            .await
            .context("Initial model request failed")?;

        tracing::debug!("LLM response: {:?}", response);

        if response.tool_calls.is_empty() {
            return Ok(AgentOutcome::Reply {
                content: response.content.unwrap_or_default(),
                invocations: Vec::new(),
                model_rounds: 1,
            });
        }

        let mut invocations = Vec::with_capacity(response.tool_calls.len());
        let mut tool_messages = Vec::with_capacity(response.tool_calls.len());

        for tool_call in &response.tool_calls {
            tracing::info!(
                "LLM requested tool: {} id: {} args: {}",
                tool_call.name,
                tool_call.id,
                tool_call.arguments
            );

            if !known_tools.contains(tool_call.name.as_str()) {
                anyhow::bail!("Model requested unknown tool: {}", tool_call.name);
            }

            let output = self
                .tool_executor
                .call_tool(&tool_call.name, tool_call.arguments.clone())
                .await
                .with_context(|| format!("Tool {} failed", tool_call.name))?;

            tracing::info!("Tool result for {}: {}", tool_call.name, output);

            tool_messages.push(ChatMessage::tool_result(&tool_call.id, output.clone()));
            invocations.push(ToolInvocation {
                id: tool_call.id.clone(),
                name: tool_call.name.clone(),
                arguments: tool_call.arguments.clone(),
                output,
            });
        }

        messages.push(ChatMessage::assistant(
            response.content.clone(),
            response.tool_calls.clone(),
        ));
        messages.extend(tool_messages);

        let final_response = llm
            .complete(CompletionRequest {
                model: model.to_string(),
                messages,
                tools: tool_definitions,
            })
            .await
            .context("Follow-up model request failed")?;

        Ok(AgentOutcome::Reply {
            content: final_response.content.unwrap_or_default(),
            invocations,
            model_rounds: 2,
        })
    }
}
