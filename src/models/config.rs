use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::category::DeletePolicy;

/// Configuration options for the Rango server and its helper binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Cookie signing key; at least 64 bytes. A random key is generated when empty.
    #[serde(default)]
    pub secret: String,
    /// Glob passed to Tera when loading templates.
    pub templates_dir: String,
    /// Policy applied when a category that still owns pages is deleted.
    #[serde(default)]
    pub category_delete_policy: DeletePolicy,
}

impl ServerConfig {
    /// Layers `config/default.yaml`, `config/{APP_ENV}.yaml` and `APP__*`
    /// environment variables, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
