//! Fragment store - cache of processed fragment content
//!
//! One explicit store value is owned by the [`Bundler`](super::Bundler) and
//! threaded through every pass. Entries are created lazily on first
//! reference, dropped when the fragment changes on disk, and purged when the
//! fragment is no longer required by the index.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::entities::{FragmentId, RequiredSet};
use crate::domain::ports::FileSystem;
use crate::domain::services::{
    empty_placeholder, is_blank, process_fragment, unreadable_placeholder,
};
use crate::domain::value_objects::FragmentRoots;

/// How a fragment's content was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Served from the cache, no disk access
    Cache,
    /// Read from disk and cached
    Disk,
    /// Read from disk, processed to nothing; cached, placeholder returned
    Empty,
    /// Could not be read; placeholder returned, nothing cached
    Unreadable { reason: String },
}

impl Origin {
    /// First successful resolution of a fragment since it was last invalidated
    pub fn is_fresh(&self) -> bool {
        matches!(self, Origin::Disk | Origin::Empty)
    }
}

/// Content for one fragment reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub content: String,
    pub origin: Origin,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
struct CachedFragment {
    raw: String,
    left_offset: usize,
    processed: String,
}

impl CachedFragment {
    fn new(raw: String, left_offset: usize) -> Self {
        let processed = process_fragment(&raw, left_offset);
        Self {
            raw,
            left_offset,
            processed,
        }
    }

    fn is_empty(&self) -> bool {
        is_blank(&self.processed)
    }
}

/// Per-(kind, name) cache of processed fragment content
#[derive(Debug, Clone)]
pub struct FragmentStore {
    roots: FragmentRoots,
    entries: HashMap<FragmentId, CachedFragment>,
}

impl FragmentStore {
    pub fn new(roots: FragmentRoots) -> Self {
        Self {
            roots,
            entries: HashMap::new(),
        }
    }

    pub fn roots(&self) -> &FragmentRoots {
        &self.roots
    }

    pub fn path_of(&self, id: &FragmentId) -> PathBuf {
        self.roots.path_of(id)
    }

    /// Processed content of a fragment, reading it from disk on a cache miss
    ///
    /// A fragment referenced at a different offset than the one it was
    /// cached for is re-processed from the cached raw text.
    pub fn get<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        id: &FragmentId,
        left_offset: usize,
    ) -> Resolved {
        let path = self.path_of(id);

        if let Some(entry) = self.entries.get_mut(id) {
            if entry.left_offset != left_offset {
                *entry = CachedFragment::new(std::mem::take(&mut entry.raw), left_offset);
            }
            let content = if entry.is_empty() {
                empty_placeholder(&path)
            } else {
                entry.processed.clone()
            };
            return Resolved {
                content,
                origin: Origin::Cache,
                path,
            };
        }

        let raw = match fs.read(&path) {
            Ok(raw) => raw,
            Err(err) => {
                let reason = err.reason();
                return Resolved {
                    content: unreadable_placeholder(&path, &reason),
                    origin: Origin::Unreadable { reason },
                    path,
                };
            }
        };

        let entry = CachedFragment::new(raw, left_offset);
        let resolved = if entry.is_empty() {
            Resolved {
                content: empty_placeholder(&path),
                origin: Origin::Empty,
                path,
            }
        } else {
            Resolved {
                content: entry.processed.clone(),
                origin: Origin::Disk,
                path,
            }
        };
        self.entries.insert(id.clone(), entry);
        resolved
    }

    /// Drop the cached content so the next `get` re-reads from disk
    ///
    /// Returns whether an entry was cached.
    pub fn invalidate(&mut self, id: &FragmentId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Purge every entry whose fragment is no longer required
    pub fn retain_required(&mut self, required: &RequiredSet) -> Vec<FragmentId> {
        let stale: Vec<FragmentId> = self
            .entries
            .keys()
            .filter(|id| !required.contains(id))
            .cloned()
            .collect();
        for id in &stale {
            self.entries.remove(id);
        }
        stale
    }

    pub fn is_cached(&self, id: &FragmentId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::MemoryFs;

    fn roots() -> FragmentRoots {
        FragmentRoots {
            local_dir: PathBuf::from("/p/PROJECTS/demo/IMPORTS"),
            global_dir: PathBuf::from("/p/GLOBALS"),
            extension: "js".to_string(),
        }
    }

    #[test]
    fn miss_reads_processes_and_caches() {
        let fs = MemoryFs::new().with_file("/p/GLOBALS/utils.js", "// c\na();\nb();\n");
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::global("utils");

        let resolved = store.get(&fs, &id, 2);
        assert_eq!(resolved.origin, Origin::Disk);
        assert_eq!(resolved.content, "a();\n  b();\n");
        assert!(store.is_cached(&id));
    }

    #[test]
    fn hit_does_not_touch_disk() {
        let fs = MemoryFs::new().with_file("/p/GLOBALS/utils.js", "a();\n");
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::global("utils");

        store.get(&fs, &id, 0);
        fs.insert("/p/GLOBALS/utils.js", "changed();\n");

        let resolved = store.get(&fs, &id, 0);
        assert_eq!(resolved.origin, Origin::Cache);
        assert_eq!(resolved.content, "a();\n");
    }

    #[test]
    fn invalidate_forces_reread() {
        let fs = MemoryFs::new().with_file("/p/GLOBALS/utils.js", "a();\n");
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::global("utils");

        store.get(&fs, &id, 0);
        fs.insert("/p/GLOBALS/utils.js", "changed();\n");
        assert!(store.invalidate(&id));

        let resolved = store.get(&fs, &id, 0);
        assert_eq!(resolved.origin, Origin::Disk);
        assert_eq!(resolved.content, "changed();\n");
    }

    #[test]
    fn missing_fragment_yields_placeholder_and_no_cache_entry() {
        let fs = MemoryFs::new();
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::local("ghost");

        let resolved = store.get(&fs, &id, 0);
        assert_eq!(
            resolved.content,
            "/* File /p/PROJECTS/demo/IMPORTS/ghost.js wasn't found (no such file). */\n"
        );
        assert!(matches!(resolved.origin, Origin::Unreadable { .. }));
        assert!(!store.is_cached(&id));

        fs.insert("/p/PROJECTS/demo/IMPORTS/ghost.js", "boo();\n");
        let resolved = store.get(&fs, &id, 0);
        assert_eq!(resolved.origin, Origin::Disk);
        assert_eq!(resolved.content, "boo();\n");
    }

    #[test]
    fn blank_fragment_is_represented_by_placeholder() {
        let fs = MemoryFs::new().with_file("/p/GLOBALS/blank.js", "  \n// only a comment\n\n");
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::global("blank");

        let first = store.get(&fs, &id, 0);
        assert_eq!(first.origin, Origin::Empty);
        assert_eq!(first.content, "/* File /p/GLOBALS/blank.js is empty. */\n");

        let second = store.get(&fs, &id, 0);
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn different_offset_reprocesses_cached_raw() {
        let fs = MemoryFs::new().with_file("/p/GLOBALS/utils.js", "a();\nb();\n");
        let mut store = FragmentStore::new(roots());
        let id = FragmentId::global("utils");

        store.get(&fs, &id, 0);
        fs.remove("/p/GLOBALS/utils.js");

        let resolved = store.get(&fs, &id, 4);
        assert_eq!(resolved.origin, Origin::Cache);
        assert_eq!(resolved.content, "a();\n    b();\n");
    }

    #[test]
    fn retain_required_purges_stale_entries() {
        let fs = MemoryFs::new()
            .with_file("/p/GLOBALS/a.js", "a();\n")
            .with_file("/p/GLOBALS/b.js", "b();\n");
        let mut store = FragmentStore::new(roots());
        store.get(&fs, &FragmentId::global("a"), 0);
        store.get(&fs, &FragmentId::global("b"), 0);

        let mut required = RequiredSet::new();
        required.insert(&FragmentId::global("a"));

        let purged = store.retain_required(&required);
        assert_eq!(purged, vec![FragmentId::global("b")]);
        assert!(store.is_cached(&FragmentId::global("a")));
        assert_eq!(store.len(), 1);
    }
}
