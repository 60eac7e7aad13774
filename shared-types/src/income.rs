use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub source: String,
    pub note: String,
}

/// Arguments of the add_income tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddIncomeParams {
    pub date: String,
    pub amount: f64,
    /// Where the money came from, e.g. salary
    pub source: String,
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_income_null_note_is_empty() {
        let params: AddIncomeParams = serde_json::from_value(serde_json::json!({
            "date": "2024-02-01",
            "amount": 90000,
            "source": "salary",
            "note": null
        }))
        .unwrap();

        assert_eq!(params.note, "");
    }
}
