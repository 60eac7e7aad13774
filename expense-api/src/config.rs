use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8000

[database]
# path = "/path/to/expenses.db"

[categories]
# JSON document served as the expense://categories resource
# path = "/path/to/categories.json"
"#;

const DEFAULT_CATEGORIES: &str = include_str!("../categories.json");

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub categories: Option<CategoriesConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CategoriesConfig {
    pub path: Option<String>,
}

impl ApiConfig {
    /// Load the config file, writing a default one first if it does not exist
    pub fn load(config_path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = config_path.unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let config = Self::from_file(&config_path)?;
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.database.as_ref().and_then(|db| db.path.as_ref()) {
            return Ok(PathBuf::from(path));
        }
        Ok(get_data_dir()?.join("expenses.db"))
    }

    pub fn categories_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.categories.as_ref().and_then(|c| c.path.as_ref()) {
            return Ok(PathBuf::from(path));
        }
        Ok(get_data_dir()?.join("categories.json"))
    }
}

/// Write the bundled category map to `path` if nothing is there yet.
///
/// Returns `true` when the file was created. An existing file is never overwritten.
pub fn seed_categories(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, DEFAULT_CATEGORIES)?;
    Ok(true)
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("expense-tracker").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

/// Platform data directory, e.g. `~/.local/share/expense-tracker` on Linux
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(data_dir.join("expense-tracker"))
}
