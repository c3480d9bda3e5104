use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::session::SessionConfig;
use super::store::StoreConfig;
use crate::errors::SessionError;

/// Prefix for environment overrides, e.g. `ESTATE_ADMIN_API__BASE_URL`.
/// `ESTATE_ADMIN_CONFIG` and `ESTATE_ADMIN_PASSWORD` belong to the CLI.
pub const ENV_PREFIX: &str = "ESTATE_ADMIN_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend API, session store, session policy, logging.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The listing site's REST backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout; the transport default applies when unset.
    #[serde(default)]
    pub timeout_in_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:5000".to_string(),
            timeout_in_ms: None,
        }
    }
}

/// Layer built-in defaults, the YAML file at `path` (if it exists) and
/// `ESTATE_ADMIN_*` environment variables, in that order.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, SessionError> {
    let figment = Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::file(path.as_ref()))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["config", "password"])
                .split("__"),
        );
    extract(figment)
}

/// Parse a configuration from a YAML string on top of the defaults.
pub fn load_config_str(yaml: &str) -> Result<ConfigV1, SessionError> {
    let figment = Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::string(yaml));
    extract(figment)
}

fn extract(figment: Figment) -> Result<ConfigV1, SessionError> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), SessionError> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
