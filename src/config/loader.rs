//! Configuration loading
//!
//! Hierarchy, highest priority first:
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables, then `<root>/.env` for the ones not set
//! 3. Project config (`<root>/auaust.toml`)
//! 4. User config (`<config_dir>/auaust/config.toml`)
//! 5. Built-in defaults

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{BundlerError, BundlerResult};

use super::types::{ColorMode, Config};

/// Project config file name, looked up in the bundler root
pub const PROJECT_CONFIG_FILE: &str = "auaust.toml";

/// Variable file read from the bundler root
pub const DOTENV_FILE: &str = ".env";

/// Active project identifier
pub const ENV_PROJECT: &str = "CURRENT_PROJECT";
/// Index file name override
pub const ENV_INDEX_FILE: &str = "INDEX_FILE";
pub const ENV_POLL_INTERVAL: &str = "AUAUST_POLL_INTERVAL_MS";
pub const ENV_DEBOUNCE: &str = "AUAUST_DEBOUNCE_MS";
pub const ENV_COLOR: &str = "AUAUST_COLOR";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BundlerResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> BundlerResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BundlerError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// User-level config file location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("auaust").join("config.toml"))
}

/// Load from project config, user config, or defaults, then apply env
///
/// A config file that fails to parse is skipped and the next level is
/// tried. Unknown-key warnings come from the file that was used.
pub fn load_or_default_with_warnings(root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    let (config, warnings) = load_files(root);
    let dotenv = root.map(load_dotenv).unwrap_or_default();
    let config = with_env_lookup(config, |key| {
        std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
    });
    (config, warnings)
}

fn load_files(root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(root) = root {
        candidates.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(user) = user_config_path() {
        candidates.push(user);
    }

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        if let Ok(loaded) = load_with_warnings(&candidate) {
            return loaded;
        }
    }

    (Config::default(), Vec::new())
}

/// Variables from `<root>/.env`
///
/// The process environment is left untouched. A missing file yields
/// nothing; malformed lines are skipped.
pub fn load_dotenv(root: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(root.join(DOTENV_FILE)) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(_) => HashMap::new(),
    }
}

/// Apply overrides from an arbitrary variable source
pub fn with_env_lookup<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(project) = lookup(ENV_PROJECT).filter(|v| !v.trim().is_empty()) {
        config.project.id = Some(project.trim().to_string());
    }

    if let Some(index) = lookup(ENV_INDEX_FILE).filter(|v| !v.trim().is_empty()) {
        config.project.index_file = index.trim().to_string();
    }

    if let Some(ms) = lookup(ENV_POLL_INTERVAL).and_then(|v| v.trim().parse().ok()) {
        config.watch.poll_interval_ms = ms;
    }

    if let Some(ms) = lookup(ENV_DEBOUNCE).and_then(|v| v.trim().parse().ok()) {
        config.watch.debounce_ms = ms;
    }

    if let Some(color) = lookup(ENV_COLOR) {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "id",
        "index_file",
        "paths",
        "projects_dir",
        "imports_dir",
        "globals_dir",
        "bundles_dir",
        "extension",
        "bundle_extension",
        "watch",
        "poll_interval_ms",
        "debounce_ms",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
