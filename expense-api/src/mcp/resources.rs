use serde::Serialize;
use std::path::Path;

pub const CATEGORIES_URI: &str = "expense://categories";
pub const CATEGORIES_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize)]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

pub fn resource_definitions() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: CATEGORIES_URI,
        name: "categories",
        description: "Expense categories and their subcategories.",
        mime_type: CATEGORIES_MIME_TYPE,
    }]
}

/// Read the category document from disk. Not cached, so edits show up on the next read.
pub async fn read_categories(path: &Path) -> std::io::Result<String> {
    tracing::debug!(path = %path.display(), "categories resource requested");
    tokio::fs::read_to_string(path).await
}
