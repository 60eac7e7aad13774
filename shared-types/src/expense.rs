use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single spending entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Arguments of the add_expense tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddExpenseParams {
    /// Date of the expense, e.g. 2024-01-15
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub note: String,
}

/// Arguments of the summarize tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    pub start_date: String,
    pub end_date: String,
    /// Restrict the summary to one category
    #[serde(default)]
    pub category: Option<String>,
}

/// Fields to change on an existing expense. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.note.is_none()
    }
}

/// Arguments of the update_expense tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateExpenseParams {
    pub expense_id: i64,
    #[serde(flatten)]
    pub patch: ExpensePatch,
}

/// Arguments of the delete_expense tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteExpenseParams {
    pub expense_id: i64,
}

/// Total spending of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
}
