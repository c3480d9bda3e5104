use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the session slots live.
/// - type: the backend (in-process memory or files on disk).
/// - path: directory for the file backend, ignored by memory.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub backend: StoreBackend,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The existing store backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Gone when the process exits.
    Memory,
    /// One file per slot, survives restarts.
    File,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::File,
            path: Some(PathBuf::from(".estate-admin")),
        }
    }
}
