use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::MonsterConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "monster.toml",
    "monster.yaml",
    "monster.yml",
    "monster.json",
];

const STORAGE_FILENAME: &str = "session.json";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<MonsterConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./monster.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/monster/monster.{toml,yaml,yml,json}` (user-global)
///
/// Returns `MonsterConfig::default()` if no config file is found or the one
/// found fails to parse.
pub fn discover_and_load() -> MonsterConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    MonsterConfig::default()
}

fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/monster/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "monster").map(|d| d.config_dir().to_path_buf())
}

/// Returns the user data directory where the session file lives by default.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "monster").map(|d| d.data_dir().to_path_buf())
}

/// Apply `MONSTER_*` environment overrides on top of a loaded config.
pub fn apply_env_overrides(config: MonsterConfig) -> MonsterConfig {
    apply_env_overrides_with(config, |name| std::env::var(name).ok())
}

fn apply_env_overrides_with(
    mut config: MonsterConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> MonsterConfig {
    if let Some(url) = lookup("MONSTER_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
        debug!(base_url = %url, "api base url overridden from environment");
        config.api.base_url = url;
    }
    if let Some(path) = lookup("MONSTER_STORAGE_PATH").filter(|v| !v.trim().is_empty()) {
        config.storage.path = Some(PathBuf::from(path));
    }
    config
}

/// Storage file to use: the configured path, else `<data dir>/session.json`,
/// else `./session.json` when no home directory can be determined.
pub fn resolve_storage_path(config: &MonsterConfig) -> PathBuf {
    if let Some(path) = &config.storage.path {
        return path.clone();
    }
    data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORAGE_FILENAME)
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<MonsterConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
