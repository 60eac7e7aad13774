use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

pub mod budget;
pub mod expense;
pub mod income;

pub use budget::{BudgetStatus, BudgetStatusParams, SetBudgetParams};
pub use expense::{
    AddExpenseParams, CategoryTotal, DeleteExpenseParams, Expense, ExpensePatch,
    SummarizeParams, UpdateExpenseParams,
};
pub use income::{AddIncomeParams, Income};

/// Treat an explicit `null` like a missing optional text argument
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Inclusive date range shared by the listing tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DateRangeParams {
    /// First date included in the range, e.g. 2024-01-01
    pub start_date: String,
    /// Last date included in the range, e.g. 2024-12-31
    pub end_date: String,
}

/// Status reply returned by the mutating tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            id: None,
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            status: "ok".to_string(),
            id: Some(id),
        }
    }

    pub fn no_changes() -> Self {
        Self {
            status: "no_changes".to_string(),
            id: None,
        }
    }

    pub fn deleted() -> Self {
        Self {
            status: "deleted".to_string(),
            id: None,
        }
    }
}
