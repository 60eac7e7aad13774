use crate::database::{AsyncDbConnection, DatabaseError};
use rusqlite::params;
use shared_types::{AddIncomeParams, Income};

pub async fn insert_income(
    conn: AsyncDbConnection,
    income: &AddIncomeParams,
) -> Result<i64, DatabaseError> {
    let conn = conn.lock().await?;

    conn.execute(
        "INSERT INTO income (date, amount, source, note) VALUES (?, ?, ?, ?)",
        params![&income.date, income.amount, &income.source, &income.note],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Income inside the inclusive range, ordered by date rather than by id
pub async fn list_income(
    conn: AsyncDbConnection,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Income>, DatabaseError> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, date, amount, source, note
         FROM income
         WHERE date BETWEEN ? AND ?
         ORDER BY date",
    )?;

    let rows = stmt
        .query_map(params![start_date, end_date], |row| {
            Ok(Income {
                id: row.get(0)?,
                date: row.get(1)?,
                amount: row.get(2)?,
                source: row.get(3)?,
                note: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
