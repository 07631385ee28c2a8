//! Configuration module for auaust
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`CURRENT_PROJECT`, `INDEX_FILE`, `AUAUST_*`),
//!    falling back to `<root>/.env`
//! 3. Project config (`<root>/auaust.toml`)
//! 4. User config (`~/.config/auaust/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    load_dotenv, load_or_default_with_warnings, user_config_path, with_env_lookup, DOTENV_FILE,
    ENV_COLOR, ENV_DEBOUNCE, ENV_INDEX_FILE, ENV_POLL_INTERVAL, ENV_PROJECT, PROJECT_CONFIG_FILE,
};
pub use types::{ColorMode, Config, OutputConfig, PathsConfig, ProjectConfig, WatchConfig};
