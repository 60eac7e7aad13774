use actix_web::{web, App, HttpServer};
use expense_agent::{AgentOutcome, ExpenseAgent, McpClient, ToolExecutor};
use expense_api::{configure_routes, Database, McpServer};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

/// Start the gateway on an ephemeral port and return its MCP endpoint
fn start_gateway() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::new(&dir.path().join("expenses.db")).unwrap());
    let categories_path = dir.path().join("categories.json");
    std::fs::write(&categories_path, r#"{"food": ["groceries"]}"#).unwrap();
    let mcp_server = Arc::new(McpServer::new(db.async_connection.clone(), categories_path));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(mcp_server.clone()))
            .configure(configure_routes)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    (dir, format!("http://{}/mcp", addr))
}

#[actix_web::test]
async fn test_client_lists_and_calls_tools() {
    let (_dir, url) = start_gateway();
    let client = McpClient::new(url);

    let init = client.initialize().await.unwrap();
    assert_eq!(init["serverInfo"]["name"], "ExpenseTracker");

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 9);
    assert!(tools.iter().any(|t| t.name == "budget_status"));

    let added = client
        .call_tool(
            "add_expense",
            json!({"date": "2024-01-15", "amount": 5000.0, "category": "shopping", "note": "New shoes"}),
        )
        .await
        .unwrap();
    assert!(!added.is_error);
    assert_eq!(added.structured_content.as_ref().unwrap()["status"], "ok");

    let listed = ToolExecutor::call_tool(
        &client,
        "list_expenses",
        json!({"start_date": "2024-01-01", "end_date": "2024-12-31"}),
    )
    .await
    .unwrap();
    let rows: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["note"], "New shoes");
}

#[actix_web::test]
async fn test_failed_tool_call_surfaces_as_error() {
    let (_dir, url) = start_gateway();
    let client = McpClient::new(url);
    client.initialize().await.unwrap();

    let result = ToolExecutor::call_tool(&client, "add_expense", json!({"date": "2024-01-15"})).await;
    assert!(result.is_err());
}

#[actix_web::test]
async fn test_smoke_test_against_live_gateway() {
    let (_dir, url) = start_gateway();
    let client = Arc::new(McpClient::new(url));
    client.initialize().await.unwrap();

    client
        .call_tool(
            "add_expense",
            json!({"date": "2031-06-01", "amount": 12.5, "category": "food"}),
        )
        .await
        .unwrap();

    let agent = ExpenseAgent::new(client);
    let tools = agent.discover_tools().await.unwrap();
    assert_eq!(tools.len(), 9);

    match agent.run_smoke_test().await.unwrap() {
        AgentOutcome::SmokeTest { output } => assert!(output.contains("2031-06-01")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
