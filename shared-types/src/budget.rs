use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Budget usage of one category for a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub monthly_limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Arguments of the set_budget tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetBudgetParams {
    pub category: String,
    pub monthly_limit: f64,
}

/// Arguments of the budget_status tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BudgetStatusParams {
    /// Month in YYYY-MM form
    pub month: String,
}
