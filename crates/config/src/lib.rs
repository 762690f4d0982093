//! Configuration loading and environment overrides.
//!
//! Config files: `monster.toml`, `monster.yaml`, or `monster.json`
//! Searched in `./` then `~/.config/monster/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{
        apply_env_overrides, config_dir, data_dir, discover_and_load, load_config,
        resolve_storage_path,
    },
    schema::{ApiConfig, MonsterConfig, StorageConfig},
};
