//! Config schema types (remote API, durable storage).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ACTIVE_PROJECT_KEY: &str = "monster_active_project_id";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Remote novel API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without trailing slash. Collection lives at `{base_url}/novels`.
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Where the active project id is remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the key-value pairs. `None` means `<data dir>/session.json`.
    pub path: Option<PathBuf>,
    pub active_project_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            active_project_key: DEFAULT_ACTIVE_PROJECT_KEY.into(),
        }
    }
}
