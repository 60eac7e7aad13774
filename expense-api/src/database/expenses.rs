use crate::database::{AsyncDbConnection, DatabaseError};
use rusqlite::{params, Row};
use shared_types::{AddExpenseParams, CategoryTotal, Expense, ExpensePatch};

/// Result of applying an [`ExpensePatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NoChanges,
}

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

pub async fn insert_expense(
    conn: AsyncDbConnection,
    expense: &AddExpenseParams,
) -> Result<i64, DatabaseError> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO expenses (date, amount, category, subcategory, note)
         VALUES (?, ?, ?, ?, ?)",
        params![
            &expense.date,
            expense.amount,
            &expense.category,
            &expense.subcategory,
            &expense.note,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Expenses with `start_date <= date <= end_date`, compared as strings
pub async fn list_expenses(
    conn: AsyncDbConnection,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Expense>, DatabaseError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, date, amount, category, subcategory, note
         FROM expenses
         WHERE date BETWEEN ? AND ?
         ORDER BY id ASC",
    )?;

    let expenses = stmt
        .query_map(params![start_date, end_date], row_to_expense)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expenses)
}

pub async fn summarize_expenses(
    conn: AsyncDbConnection,
    start_date: &str,
    end_date: &str,
    category: Option<&str>,
) -> Result<Vec<CategoryTotal>, DatabaseError> {
    let conn = conn.lock().await?;

    let mut query = String::from(
        "SELECT category, SUM(amount) AS total_amount
         FROM expenses
         WHERE date BETWEEN ? AND ?",
    );
    let mut query_params: Vec<Box<dyn rusqlite::ToSql>> =
        vec![Box::new(start_date.to_string()), Box::new(end_date.to_string())];

    if let Some(category) = category.filter(|c| !c.is_empty()) {
        query.push_str(" AND category = ?");
        query_params.push(Box::new(category.to_string()));
    }

    query.push_str(" GROUP BY category ORDER BY category ASC");

    let params_refs: Vec<&dyn rusqlite::ToSql> =
        query_params.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&query)?;
    let totals = stmt
        .query_map(params_refs.as_slice(), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total_amount: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(totals)
}

/// Apply only the fields present in `patch`. An empty patch never touches the database.
pub async fn update_expense(
    conn: AsyncDbConnection,
    expense_id: i64,
    patch: &ExpensePatch,
) -> Result<UpdateOutcome, DatabaseError> {
    if patch.is_empty() {
        return Ok(UpdateOutcome::NoChanges);
    }

    let mut updates: Vec<&str> = Vec::new();
    let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(date) = &patch.date {
        updates.push("date = ?");
        query_params.push(Box::new(date.clone()));
    }
    if let Some(amount) = patch.amount {
        updates.push("amount = ?");
        query_params.push(Box::new(amount));
    }
    if let Some(category) = &patch.category {
        updates.push("category = ?");
        query_params.push(Box::new(category.clone()));
    }
    if let Some(subcategory) = &patch.subcategory {
        updates.push("subcategory = ?");
        query_params.push(Box::new(subcategory.clone()));
    }
    if let Some(note) = &patch.note {
        updates.push("note = ?");
        query_params.push(Box::new(note.clone()));
    }

    query_params.push(Box::new(expense_id));

    let query = format!("UPDATE expenses SET {} WHERE id = ?", updates.join(", "));
    let params_refs: Vec<&dyn rusqlite::ToSql> =
        query_params.iter().map(|p| p.as_ref()).collect();

    let conn = conn.lock().await?;
    conn.execute(&query, params_refs.as_slice())?;

    Ok(UpdateOutcome::Updated)
}

/// Returns the number of rows removed; a missing id removes nothing and is not an error
pub async fn delete_expense(conn: AsyncDbConnection, expense_id: i64) -> Result<usize, DatabaseError> {
    let conn = conn.lock().await?;
    let affected = conn.execute("DELETE FROM expenses WHERE id = ?", [expense_id])?;
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::temp_database;

    fn expense(date: &str, amount: f64, category: &str) -> AddExpenseParams {
        AddExpenseParams {
            date: date.to_string(),
            amount,
            category: category.to_string(),
            subcategory: String::new(),
            note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_and_are_not_reused() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let first = insert_expense(conn.clone(), &expense("2024-01-01", 10.0, "food"))
            .await
            .unwrap();
        let second = insert_expense(conn.clone(), &expense("2024-01-02", 20.0, "food"))
            .await
            .unwrap();
        assert!(second > first);

        delete_expense(conn.clone(), second).await.unwrap();
        let third = insert_expense(conn.clone(), &expense("2024-01-03", 30.0, "food"))
            .await
            .unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_list_expenses_inclusive_range_ordered_by_id() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let late = insert_expense(conn.clone(), &expense("2024-03-31", 5.0, "food"))
            .await
            .unwrap();
        insert_expense(conn.clone(), &expense("2024-04-01", 6.0, "food"))
            .await
            .unwrap();
        let early = insert_expense(conn.clone(), &expense("2024-03-01", 7.0, "rent"))
            .await
            .unwrap();

        let listed = list_expenses(conn, "2024-03-01", "2024-03-31").await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![late, early]);
    }

    #[tokio::test]
    async fn test_insert_then_list_preserves_fields() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let mut shoes = expense("2024-01-15", 5000.0, "shopping");
        shoes.note = "New shoes".to_string();
        let id = insert_expense(conn.clone(), &shoes).await.unwrap();

        let listed = list_expenses(conn, "2024-01-01", "2024-12-31").await.unwrap();
        assert_eq!(
            listed,
            vec![Expense {
                id,
                date: "2024-01-15".to_string(),
                amount: 5000.0,
                category: "shopping".to_string(),
                subcategory: String::new(),
                note: "New shoes".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_summarize_groups_by_category() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        insert_expense(conn.clone(), &expense("2024-05-01", 10.0, "travel")).await.unwrap();
        insert_expense(conn.clone(), &expense("2024-05-02", 15.5, "food")).await.unwrap();
        insert_expense(conn.clone(), &expense("2024-05-03", 4.5, "food")).await.unwrap();
        insert_expense(conn.clone(), &expense("2024-06-01", 100.0, "food")).await.unwrap();

        let totals = summarize_expenses(conn.clone(), "2024-05-01", "2024-05-31", None)
            .await
            .unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryTotal { category: "food".to_string(), total_amount: 20.0 },
                CategoryTotal { category: "travel".to_string(), total_amount: 10.0 },
            ]
        );

        let only_travel = summarize_expenses(conn.clone(), "2024-05-01", "2024-05-31", Some("travel"))
            .await
            .unwrap();
        assert_eq!(only_travel.len(), 1);
        assert_eq!(only_travel[0].category, "travel");

        let missing = summarize_expenses(conn, "2024-05-01", "2024-05-31", Some("rent"))
            .await
            .unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_empty_patch_reports_no_changes() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let id = insert_expense(conn.clone(), &expense("2024-01-01", 42.0, "food"))
            .await
            .unwrap();
        let before = list_expenses(conn.clone(), "2024-01-01", "2024-01-01").await.unwrap();

        let outcome = update_expense(conn.clone(), id, &ExpensePatch::default())
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NoChanges);

        let after = list_expenses(conn, "2024-01-01", "2024-01-01").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_partial_patch_changes_only_supplied_fields() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        let mut original = expense("2024-01-01", 42.0, "food");
        original.subcategory = "groceries".to_string();
        original.note = "weekly".to_string();
        let id = insert_expense(conn.clone(), &original).await.unwrap();

        let patch = ExpensePatch {
            amount: Some(50.0),
            note: Some("weekly shop".to_string()),
            ..Default::default()
        };
        let outcome = update_expense(conn.clone(), id, &patch).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);

        let listed = list_expenses(conn, "2024-01-01", "2024-01-01").await.unwrap();
        assert_eq!(
            listed,
            vec![Expense {
                id,
                date: "2024-01-01".to_string(),
                amount: 50.0,
                category: "food".to_string(),
                subcategory: "groceries".to_string(),
                note: "weekly shop".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_expense_affects_nothing() {
        let (_dir, db) = temp_database();
        let conn = db.async_connection.clone();

        insert_expense(conn.clone(), &expense("2024-01-01", 1.0, "food")).await.unwrap();

        let affected = delete_expense(conn.clone(), 9999).await.unwrap();
        assert_eq!(affected, 0);

        let listed = list_expenses(conn, "2000-01-01", "2100-01-01").await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
