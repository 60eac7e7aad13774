use crate::database::{budgets, expenses, income, AsyncDbConnection, DatabaseError};
use crate::database::expenses::UpdateOutcome;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{
    AddExpenseParams, AddIncomeParams, BudgetStatusParams, DateRangeParams, DeleteExpenseParams,
    SetBudgetParams, StatusResponse, SummarizeParams, UpdateExpenseParams,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Failed to encode tool result: {0}")]
    Encode(serde_json::Error),
}

/// Entry of the `tools/list` reply
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    fn from_type<T: JsonSchema>(name: &'static str, description: &'static str) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name,
            description,
            input_schema: serde_json::to_value(schema)
                .unwrap_or_else(|_| serde_json::json!({ "type": "object" })),
        }
    }
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::from_type::<AddExpenseParams>(
            "add_expense",
            "Add a new expense entry to the database.",
        ),
        ToolDefinition::from_type::<DateRangeParams>(
            "list_expenses",
            "List expense entries within an inclusive date range.",
        ),
        ToolDefinition::from_type::<SummarizeParams>(
            "summarize",
            "Summarize expenses by category within an inclusive date range.",
        ),
        ToolDefinition::from_type::<UpdateExpenseParams>(
            "update_expense",
            "Update an existing expense. Only the supplied fields are changed.",
        ),
        ToolDefinition::from_type::<DeleteExpenseParams>(
            "delete_expense",
            "Delete an expense by ID.",
        ),
        ToolDefinition::from_type::<AddIncomeParams>("add_income", "Add an income entry."),
        ToolDefinition::from_type::<DateRangeParams>(
            "list_income",
            "List income entries in a date range.",
        ),
        ToolDefinition::from_type::<SetBudgetParams>(
            "set_budget",
            "Set monthly budget for a category.",
        ),
        ToolDefinition::from_type::<BudgetStatusParams>(
            "budget_status",
            "Show spending against each category budget for a month (YYYY-MM).",
        ),
    ]
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn encode<T: Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Encode)
}

/// Run one tool against the store and return its JSON result
pub async fn call_tool(
    conn: AsyncDbConnection,
    name: &str,
    arguments: Value,
) -> Result<Value, ToolError> {
    match name {
        "add_expense" => {
            let params: AddExpenseParams = parse_arguments(name, arguments)?;
            let id = expenses::insert_expense(conn, &params).await?;
            encode(StatusResponse::created(id))
        }
        "list_expenses" => {
            let params: DateRangeParams = parse_arguments(name, arguments)?;
            let rows = expenses::list_expenses(conn, &params.start_date, &params.end_date).await?;
            encode(rows)
        }
        "summarize" => {
            let params: SummarizeParams = parse_arguments(name, arguments)?;
            let totals = expenses::summarize_expenses(
                conn,
                &params.start_date,
                &params.end_date,
                params.category.as_deref(),
            )
            .await?;
            encode(totals)
        }
        "update_expense" => {
            let params: UpdateExpenseParams = parse_arguments(name, arguments)?;
            let outcome = expenses::update_expense(conn, params.expense_id, &params.patch).await?;
            match outcome {
                UpdateOutcome::Updated => encode(StatusResponse::ok()),
                UpdateOutcome::NoChanges => encode(StatusResponse::no_changes()),
            }
        }
        "delete_expense" => {
            let params: DeleteExpenseParams = parse_arguments(name, arguments)?;
            let affected = expenses::delete_expense(conn, params.expense_id).await?;
            tracing::debug!(expense_id = params.expense_id, affected, "delete_expense");
            encode(StatusResponse::deleted())
        }
        "add_income" => {
            let params: AddIncomeParams = parse_arguments(name, arguments)?;
            let id = income::insert_income(conn, &params).await?;
            encode(StatusResponse::created(id))
        }
        "list_income" => {
            let params: DateRangeParams = parse_arguments(name, arguments)?;
            let rows = income::list_income(conn, &params.start_date, &params.end_date).await?;
            encode(rows)
        }
        "set_budget" => {
            let params: SetBudgetParams = parse_arguments(name, arguments)?;
            budgets::upsert_budget(conn, &params.category, params.monthly_limit).await?;
            encode(StatusResponse::ok())
        }
        "budget_status" => {
            let params: BudgetStatusParams = parse_arguments(name, arguments)?;
            let rows = budgets::budget_status(conn, &params.month).await?;
            encode(rows)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::temp_database;
    use serde_json::json;

    #[test]
    fn test_nine_tools_with_object_schemas() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "add_expense",
                "list_expenses",
                "summarize",
                "update_expense",
                "delete_expense",
                "add_income",
                "list_income",
                "set_budget",
                "budget_status",
            ]
        );

        for tool in &tools {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
        }

        let add_expense = &tools[0].input_schema;
        let required = add_expense["required"].as_array().unwrap();
        assert!(required.contains(&json!("date")));
        assert!(required.contains(&json!("amount")));
        assert!(!required.contains(&json!("note")));
    }

    #[tokio::test]
    async fn test_add_then_list_scenario() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let added = call_tool(
            conn.clone(),
            "add_expense",
            json!({"date": "2024-01-15", "amount": 5000, "category": "shopping", "note": "New shoes"}),
        )
        .await
        .unwrap();
        assert_eq!(added["status"], "ok");
        let id = added["id"].as_i64().unwrap();

        let listed = call_tool(
            conn,
            "list_expenses",
            json!({"start_date": "2024-01-01", "end_date": "2024-12-31"}),
        )
        .await
        .unwrap();

        assert_eq!(
            listed,
            json!([{
                "id": id,
                "date": "2024-01-15",
                "amount": 5000.0,
                "category": "shopping",
                "subcategory": "",
                "note": "New shoes"
            }])
        );
    }

    #[tokio::test]
    async fn test_add_expense_accepts_null_note() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let added = call_tool(
            conn.clone(),
            "add_expense",
            json!({"date": "2024-03-02", "amount": 40, "category": "transport", "subcategory": null, "note": null}),
        )
        .await
        .unwrap();
        assert_eq!(added["status"], "ok");

        let listed = call_tool(
            conn,
            "list_expenses",
            json!({"start_date": "2024-03-01", "end_date": "2024-03-31"}),
        )
        .await
        .unwrap();
        assert_eq!(listed[0]["note"], "");
        assert_eq!(listed[0]["subcategory"], "");
    }

    #[tokio::test]
    async fn test_budget_scenario() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let set = call_tool(conn.clone(), "set_budget", json!({"category": "food", "monthly_limit": 300}))
            .await
            .unwrap();
        assert_eq!(set, json!({"status": "ok"}));

        call_tool(
            conn.clone(),
            "add_expense",
            json!({"date": "2024-02-01", "amount": 120, "category": "food"}),
        )
        .await
        .unwrap();

        let status = call_tool(conn, "budget_status", json!({"month": "2024-02"}))
            .await
            .unwrap();
        assert_eq!(
            status,
            json!([{"category": "food", "monthly_limit": 300.0, "spent": 120.0, "remaining": 180.0}])
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_statuses() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let untouched = call_tool(conn.clone(), "update_expense", json!({"expense_id": 1}))
            .await
            .unwrap();
        assert_eq!(untouched, json!({"status": "no_changes"}));

        let updated = call_tool(
            conn.clone(),
            "update_expense",
            json!({"expense_id": 1, "note": "fixed"}),
        )
        .await
        .unwrap();
        assert_eq!(updated, json!({"status": "ok"}));

        let deleted = call_tool(conn, "delete_expense", json!({"expense_id": 42}))
            .await
            .unwrap();
        assert_eq!(deleted, json!({"status": "deleted"}));
    }

    #[tokio::test]
    async fn test_bad_arguments_and_unknown_tool() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let err = call_tool(
            conn.clone(),
            "add_expense",
            json!({"date": "2024-01-01", "amount": "lots", "category": "food"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));

        let err = call_tool(conn, "transfer_funds", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "transfer_funds"));
    }
}
