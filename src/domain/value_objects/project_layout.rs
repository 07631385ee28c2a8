//! Resolved on-disk layout of one project
//!
//! Produced from configuration once at startup; every path the bundler
//! touches is derived from it.

use std::path::{Path, PathBuf};

use super::FragmentKind;
use crate::domain::entities::FragmentId;

/// Where fragments of each kind live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRoots {
    pub local_dir: PathBuf,
    pub global_dir: PathBuf,
    /// Extension appended to fragment names, without the dot
    pub extension: String,
}

impl FragmentRoots {
    pub fn dir(&self, kind: FragmentKind) -> &Path {
        match kind {
            FragmentKind::Local => &self.local_dir,
            FragmentKind::Global => &self.global_dir,
        }
    }

    /// `<dir>/<name>.<extension>`
    pub fn path_of(&self, id: &FragmentId) -> PathBuf {
        let file = if self.extension.is_empty() {
            id.name.clone()
        } else {
            format!("{}.{}", id.name, self.extension)
        };
        self.dir(id.kind).join(file)
    }
}

/// Paths for the active project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project identifier
    pub project: String,
    /// Index file holding the directive blocks
    pub index: PathBuf,
    /// Output bundle
    pub bundle: PathBuf,
    pub fragments: FragmentRoots,
}

impl ProjectLayout {
    /// Conventional layout under `root`
    ///
    /// ```text
    /// <root>/PROJECTS/<project>/index.js
    /// <root>/PROJECTS/<project>/IMPORTS/<name>.js
    /// <root>/GLOBALS/<name>.js
    /// <root>/BUNDLES/<project>.idjs
    /// ```
    pub fn conventional(root: &Path, project: &str) -> Self {
        let project_dir = root.join("PROJECTS").join(project);
        Self {
            project: project.to_string(),
            index: project_dir.join("index.js"),
            bundle: root.join("BUNDLES").join(format!("{}.idjs", project)),
            fragments: FragmentRoots {
                local_dir: project_dir.join("IMPORTS"),
                global_dir: root.join("GLOBALS"),
                extension: "js".to_string(),
            },
        }
    }

    pub fn fragment_path(&self, id: &FragmentId) -> PathBuf {
        self.fragments.path_of(id)
    }
}
