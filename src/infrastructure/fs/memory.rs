//! In-memory file system
//!
//! Clones share the same storage, so a test can keep a handle and edit
//! "disk" content while a bundler owns another handle.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    read_only: BTreeSet<PathBuf>,
    writes: usize,
}

/// File system backed by a shared map
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.lock().files.insert(path.into(), content.into());
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.remove(path.as_ref())
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Make writes to `path` fail with permission denied
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.lock().read_only.insert(path.into());
    }

    pub fn allow_writes(&self, path: impl AsRef<Path>) {
        self.lock().read_only.remove(path.as_ref());
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let mut state = self.lock();
        if state.read_only.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        state.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFs::new();
        let handle = fs.clone();

        handle.insert("/a.js", "a();");

        assert_eq!(fs.read(Path::new("/a.js")).unwrap(), "a();");
    }

    #[test]
    fn denied_write_keeps_previous_content() {
        let fs = MemoryFs::new().with_file("/out.idjs", "old");
        fs.deny_writes("/out.idjs");

        let err = fs.write(Path::new("/out.idjs"), "new").unwrap_err();

        assert_eq!(err.reason(), "permission denied");
        assert_eq!(fs.get("/out.idjs").as_deref(), Some("old"));
        assert_eq!(fs.write_count(), 0);
    }
}
