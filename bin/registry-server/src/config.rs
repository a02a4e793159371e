//! Configuration management for the user registry server.
//!
//! This module handles loading configuration from both base configuration file
//! and environment variables. Environment variables override the base configuration
//! and use the prefix `USERREGISTRY_`.

use std::path::PathBuf;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_with::DisplayFromStr;
use user_registry_engine::selector::{DeploymentContext, DeploymentProfile, StoreLocations};

/// Loads the application configuration from base config and environment variables.
///
/// Environment variables use double underscores `__` to denote nested keys.
/// For example, `USERREGISTRY_APP__LISTEN` corresponds to `app.listen`, and
/// `USERREGISTRY_APP__CORS_ALLOWED_ORIGINS` takes a comma separated list.
///
/// # Errors
///
/// If the configuration could not be loaded or parsed
pub fn get_configuration() -> Result<Config, ConfigError> {
    config::Config::builder()
        .add_source(File::from_str(include_str!("base_config.ron"), FileFormat::Ron))
        .add_source(
            Environment::with_prefix(Config::CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("app.cors_allowed_origins"),
        )
        .build()?
        .try_deserialize()
}

/// Root configuration structure containing all application settings.
#[derive(Deserialize)]
pub struct Config {
    /// Application-specific configuration
    pub app: AppConfig,

    /// Where the registry is deployed, which decides the record store
    pub deployment: DeploymentConfig,

    /// Record store locations
    pub store: StoreConfig,
}

/// Application-specific configuration settings.
#[derive(Deserialize)]
pub struct AppConfig {
    /// The address to listen on (e.g., "0.0.0.0:8081")
    pub listen: String,

    /// CORS allowed origins (e.g., ["http://localhost:5173", "https://example.com"])
    /// Use ["*"] to allow all origins
    pub cors_allowed_origins: Vec<String>,
}

/// Deployment context settings.
#[serde_with::serde_as]
#[derive(Deserialize)]
pub struct DeploymentConfig {
    /// Either "development" or "production"
    #[serde_as(as = "DisplayFromStr")]
    pub profile: DeploymentProfile,

    /// The host name the registry is served from
    pub host: String,
}

/// Record store settings.
#[derive(Deserialize)]
pub struct StoreConfig {
    /// JSON data file used by the file-backed store
    pub data_file: PathBuf,

    /// Directory used by the client-local store
    pub local_storage_dir: PathBuf,
}

impl Config {
    const CONFIG_ENV_PREFIX: &str = "USERREGISTRY";
}

impl From<DeploymentConfig> for DeploymentContext {
    fn from(config: DeploymentConfig) -> Self {
        DeploymentContext::builder().profile(config.profile).host(config.host).build()
    }
}

impl From<StoreConfig> for StoreLocations {
    fn from(config: StoreConfig) -> Self {
        StoreLocations::builder()
            .data_file(config.data_file)
            .local_storage_dir(config.local_storage_dir)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use user_registry_engine::selector::Backend;

    use super::*;

    #[test]
    fn base_config_targets_the_local_file_backend() {
        let config: Config = config::Config::builder()
            .add_source(File::from_str(include_str!("base_config.ron"), FileFormat::Ron))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.listen, "localhost:8081");
        assert_eq!(config.app.cors_allowed_origins, ["*"]);
        assert_eq!(config.store.data_file, PathBuf::from("data/users.json"));

        let context = DeploymentContext::from(config.deployment);
        assert_eq!(context.profile(), DeploymentProfile::Development);
        assert_eq!(context.backend(), Backend::File);
    }
}
