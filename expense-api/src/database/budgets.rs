use crate::database::{AsyncDbConnection, DatabaseError};
use rusqlite::params;
use shared_types::BudgetStatus;

/// Insert the category's limit, or overwrite it if the category already has one
pub async fn upsert_budget(
    conn: AsyncDbConnection,
    category: &str,
    monthly_limit: f64,
) -> Result<(), DatabaseError> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO budgets (category, monthly_limit)
         VALUES (?, ?)
         ON CONFLICT(category)
         DO UPDATE SET monthly_limit = excluded.monthly_limit",
        params![category, monthly_limit],
    )?;

    Ok(())
}

/// Spending against every budgeted category for `month` (YYYY-MM).
///
/// Expenses are matched on the first seven characters of their date.
pub async fn budget_status(
    conn: AsyncDbConnection,
    month: &str,
) -> Result<Vec<BudgetStatus>, DatabaseError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT
            b.category,
            b.monthly_limit,
            IFNULL(SUM(e.amount), 0.0) AS spent,
            (b.monthly_limit - IFNULL(SUM(e.amount), 0.0)) AS remaining
         FROM budgets b
         LEFT JOIN expenses e
            ON b.category = e.category
           AND substr(e.date, 1, 7) = ?
         GROUP BY b.category
         ORDER BY b.category",
    )?;

    let rows = stmt
        .query_map([month], |row| {
            Ok(BudgetStatus {
                category: row.get(0)?,
                monthly_limit: row.get(1)?,
                spent: row.get(2)?,
                remaining: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::expenses::insert_expense;
    use crate::database::test_support::temp_database;
    use shared_types::AddExpenseParams;

    #[tokio::test]
    async fn test_set_budget_twice_keeps_latest_limit() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        upsert_budget(conn.clone(), "food", 300.0).await.unwrap();
        upsert_budget(conn.clone(), "food", 450.0).await.unwrap();

        let status = budget_status(conn, "2024-02").await.unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].monthly_limit, 450.0);
    }

    #[tokio::test]
    async fn test_budget_without_spending_reports_zero() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        upsert_budget(conn.clone(), "travel", 800.0).await.unwrap();

        let status = budget_status(conn, "2024-02").await.unwrap();
        assert_eq!(
            status,
            vec![BudgetStatus {
                category: "travel".to_string(),
                monthly_limit: 800.0,
                spent: 0.0,
                remaining: 800.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_budget_status_matches_month_prefix() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        upsert_budget(conn.clone(), "food", 300.0).await.unwrap();
        upsert_budget(conn.clone(), "bills", 100.0).await.unwrap();

        for (date, amount, category) in [
            ("2024-02-01", 120.0, "food"),
            ("2024-02-28", 30.0, "food"),
            ("2024-03-01", 999.0, "food"),
            ("2024-02-10", 150.0, "bills"),
            ("2024-02-11", 5.0, "unbudgeted"),
        ] {
            insert_expense(
                conn.clone(),
                &AddExpenseParams {
                    date: date.to_string(),
                    amount,
                    category: category.to_string(),
                    subcategory: String::new(),
                    note: String::new(),
                },
            )
            .await
            .unwrap();
        }

        let status = budget_status(conn, "2024-02").await.unwrap();
        assert_eq!(
            status,
            vec![
                BudgetStatus {
                    category: "bills".to_string(),
                    monthly_limit: 100.0,
                    spent: 150.0,
                    remaining: -50.0,
                },
                BudgetStatus {
                    category: "food".to_string(),
                    monthly_limit: 300.0,
                    spent: 150.0,
                    remaining: 150.0,
                },
            ]
        );
    }
}
