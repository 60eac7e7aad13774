use crate::mcp::protocol::McpError;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

pub fn prompt_definitions() -> Vec<PromptDefinition> {
    vec![
        PromptDefinition {
            name: "expense_summary_prompt",
            description: "Summarize expenses and highlight key spending patterns.",
            arguments: vec![
                PromptArgument {
                    name: "start_date",
                    description: "First day of the period",
                    required: true,
                },
                PromptArgument {
                    name: "end_date",
                    description: "Last day of the period",
                    required: true,
                },
            ],
        },
        PromptDefinition {
            name: "budget_health_prompt",
            description: "Analyze budget usage and warn about overspending.",
            arguments: vec![PromptArgument {
                name: "month",
                description: "Month in YYYY-MM form",
                required: true,
            }],
        },
    ]
}

fn expense_summary_prompt(start_date: &str, end_date: &str) -> String {
    format!(
        r#"You are a personal finance assistant.

Summarize the user's expenses between {start_date} and {end_date}.

Tasks:
- Identify top spending categories
- Mention unusually high expenses
- Suggest 1–2 optimization ideas

Use data returned from the expense summary tool.
"#
    )
}

fn budget_health_prompt(month: &str) -> String {
    format!(
        r#"You are a budget advisor.

Analyze the user's budget status for {month}.

Tasks:
- Identify categories exceeding budget
- Flag categories above 80% usage
- Give concise, actionable advice

Base your reasoning strictly on the budget_status tool output.
"#
    )
}

fn required_argument<'a>(
    arguments: &'a Map<String, Value>,
    prompt: &str,
    name: &str,
) -> Result<&'a str, McpError> {
    arguments
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::InvalidParams(format!("{prompt} requires argument '{name}'")))
}

/// Render a prompt template with its arguments interpolated
pub fn render_prompt(name: &str, arguments: &Map<String, Value>) -> Result<String, McpError> {
    match name {
        "expense_summary_prompt" => {
            let start_date = required_argument(arguments, name, "start_date")?;
            let end_date = required_argument(arguments, name, "end_date")?;
            Ok(expense_summary_prompt(start_date, end_date))
        }
        "budget_health_prompt" => {
            let month = required_argument(arguments, name, "month")?;
            Ok(budget_health_prompt(month))
        }
        other => Err(McpError::InvalidParams(format!("Unknown prompt: {other}"))),
    }
}
