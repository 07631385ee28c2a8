//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FragmentRoots, ProjectLayout};
use crate::error::{BundlerError, BundlerResult};


/// `[project]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Active project identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Index file name inside the project directory
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            id: None,
            index_file: default_index_file(),
        }
    }
}

fn default_index_file() -> String {
    "index.js".to_string()
}

/// `[paths]` section; directories are relative to the bundler root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,

    /// Local fragment directory inside each project
    #[serde(default = "default_imports_dir")]
    pub imports_dir: String,

    #[serde(default = "default_globals_dir")]
    pub globals_dir: String,

    #[serde(default = "default_bundles_dir")]
    pub bundles_dir: String,

    /// Fragment file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_bundle_extension")]
    pub bundle_extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            imports_dir: default_imports_dir(),
            globals_dir: default_globals_dir(),
            bundles_dir: default_bundles_dir(),
            extension: default_extension(),
            bundle_extension: default_bundle_extension(),
        }
    }
}

fn default_projects_dir() -> String {
    "PROJECTS".to_string()
}

fn default_imports_dir() -> String {
    "IMPORTS".to_string()
}

fn default_globals_dir() -> String {
    "GLOBALS".to_string()
}

fn default_bundles_dir() -> String {
    "BUNDLES".to_string()
}

fn default_extension() -> String {
    "js".to_string()
}

fn default_bundle_extension() -> String {
    "idjs".to_string()
}

/// `[watch]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// How often watched files are polled for modification
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Quiet period before a burst of changes is processed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_debounce_ms() -> u64 {
    100
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watch.poll_interval_ms.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    /// Resolve every bundler path under `root`
    pub fn layout(&self, root: &Path) -> BundlerResult<ProjectLayout> {
        let project = self
            .project
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(BundlerError::MissingProjectId)?;

        let paths = &self.paths;
        let project_dir = root.join(&paths.projects_dir).join(project);
        let bundle_name = if paths.bundle_extension.is_empty() {
            project.to_string()
        } else {
            format!("{}.{}", project, paths.bundle_extension)
        };

        Ok(ProjectLayout {
            project: project.to_string(),
            index: project_dir.join(&self.project.index_file),
            bundle: root.join(&paths.bundles_dir).join(bundle_name),
            fragments: FragmentRoots {
                local_dir: project_dir.join(&paths.imports_dir),
                global_dir: root.join(&paths.globals_dir),
                extension: paths.extension.clone(),
            },
        })
    }
}
