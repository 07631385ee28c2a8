use std::path::{Path, PathBuf};

use auaust::config::{load_or_default_with_warnings, Config, ConfigWarning, PROJECT_CONFIG_FILE};

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

/// Workspace root, merged configuration and the warnings it produced
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

impl Workspace {
    /// Resolve the root and load configuration, applying CLI overrides last
    pub fn load(cli: &Cli) -> Self {
        let start = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        let root = if cli.root.is_some() {
            start
        } else {
            discover_workspace_root(&start)
        };
        let root = std::fs::canonicalize(&root).unwrap_or(root);

        let (mut config, warnings) = load_or_default_with_warnings(Some(&root));
        if let Some(project) = &cli.project {
            config.project.id = Some(project.clone());
        }
        if let Some(index) = &cli.index {
            config.project.index_file = index.clone();
        }

        Self {
            root,
            config,
            warnings,
        }
    }
}

/// Discover the workspace root from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `auaust.toml`
/// - a `PROJECTS/` directory
/// - `.git/` or `.git` file
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_workspace_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join("PROJECTS").is_dir() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

pub fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    if ui.json {
        return;
    }
    let icon = Icon::Warning.colored(ui.color, ui.unicode);
    for w in warnings {
        match w.line {
            Some(line) => eprintln!(
                "{} Unknown config key '{}' in {}:{}",
                icon,
                w.key,
                w.file.display(),
                line
            ),
            None => eprintln!("{} Unknown config key '{}' in {}", icon, w.key, w.file.display()),
        }
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
