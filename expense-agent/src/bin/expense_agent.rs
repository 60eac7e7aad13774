use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use expense_agent::expense_agent::prompt::{DEFAULT_INSTRUCTION, DEFAULT_MODEL};
use expense_agent::llm::openai::{OpenAiClient, DEFAULT_BASE_URL};
use expense_agent::{AgentMode, AgentOutcome, ExpenseAgent, McpClient};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/mcp";

#[derive(Parser, Debug)]
#[command(name = "expense-agent", about = "Drive the expense tracker tools from a language model")]
struct Cli {
    /// MCP endpoint of the expense tracker
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Chat completion model ID
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Instruction sent to the model
    #[arg(long, default_value = DEFAULT_INSTRUCTION)]
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    let client = Arc::new(McpClient::new(cli.server_url.clone()));
    client
        .initialize()
        .await
        .with_context(|| format!("Failed to connect to MCP server at {}", cli.server_url))?;
    tracing::info!("Connected to MCP server at {}", cli.server_url);

    let agent = ExpenseAgent::new(client);
    let tools = agent.discover_tools().await?;

    let mode = AgentMode::select(std::env::var("OPENAI_API_KEY").ok(), cli.model);

    let outcome = match mode {
        AgentMode::SmokeTest => agent.run_smoke_test().await?,
        AgentMode::Model { api_key, model } => {
            let base_url =
                std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let llm = OpenAiClient::with_base_url(api_key, base_url);
            agent
                .run_with_model(&llm, &model, &cli.prompt, &tools)
                .await?
        }
    };

    match outcome {
        AgentOutcome::SmokeTest { output } => {
            println!("list_expenses result:\n{}", output);
        }
        AgentOutcome::Reply {
            content,
            invocations,
            ..
        } => {
            for invocation in &invocations {
                println!("[{}] {}", invocation.name, invocation.output);
            }
            println!("\nLLM reply:\n{}", content);
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
