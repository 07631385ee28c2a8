//! Polling change notifier
//!
//! Wraps `notify::PollWatcher`, which compares modification times on its own
//! thread. Each subscribed file's parent directory is watched
//! non-recursively, so a file that is missing when subscribed is still
//! picked up once it appears. A missing directory is a subscription error;
//! the caller retries later. Events are filtered down to subscribed paths
//! and forwarded, as the exact path that was subscribed, into a channel.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notify::{Config, Event, EventKind, PollWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeNotifier, NotifyError, NotifyResult};
use crate::error::{BundlerError, BundlerResult};

/// Default polling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

type Subscriptions = Arc<Mutex<HashSet<PathBuf>>>;

/// `ChangeNotifier` backed by modification-time polling
pub struct PollNotifier {
    watcher: PollWatcher,
    subscriptions: Subscriptions,
    /// Watched directories and how many subscriptions live in each
    directories: HashMap<PathBuf, usize>,
}

impl PollNotifier {
    /// Create a notifier that sends changed paths into `changes`
    pub fn new(changes: Sender<PathBuf>, interval: Duration) -> BundlerResult<Self> {
        let subscriptions: Subscriptions = Arc::new(Mutex::new(HashSet::new()));
        let filter = Arc::clone(&subscriptions);

        let watcher = PollWatcher::new(
            move |res: notify::Result<Event>| {
                let Ok(event) = res else {
                    return;
                };
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                let Ok(subscribed) = filter.lock() else {
                    return;
                };
                for path in event.paths {
                    if subscribed.contains(&path) {
                        let _ = changes.send(path);
                    }
                }
            },
            Config::default().with_poll_interval(interval),
        )
        .map_err(|e| BundlerError::Notify(e.to_string()))?;

        Ok(Self {
            watcher,
            subscriptions,
            directories: HashMap::new(),
        })
    }

    fn directory_of(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn subscribed(&self) -> std::sync::MutexGuard<'_, HashSet<PathBuf>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChangeNotifier for PollNotifier {
    fn subscribe(&mut self, path: &Path) -> NotifyResult<()> {
        if self.subscribed().contains(path) {
            return Ok(());
        }

        let dir = Self::directory_of(path);
        if !self.directories.contains_key(&dir) {
            // `PollWatcher` accepts a missing path and then never reports it.
            if !dir.is_dir() {
                return Err(NotifyError::Watch {
                    path: path.to_path_buf(),
                    message: format!("directory {} does not exist", dir.display()),
                });
            }
            self.watcher
                .watch(&dir, RecursiveMode::NonRecursive)
                .map_err(|e| NotifyError::Watch {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
        }
        *self.directories.entry(dir).or_insert(0) += 1;
        self.subscribed().insert(path.to_path_buf());
        Ok(())
    }

    fn unsubscribe(&mut self, path: &Path) -> NotifyResult<()> {
        if !self.subscribed().remove(path) {
            return Ok(());
        }

        let dir = Self::directory_of(path);
        let Some(count) = self.directories.get_mut(&dir) else {
            return Ok(());
        };
        *count -= 1;
        if *count > 0 {
            return Ok(());
        }
        self.directories.remove(&dir);
        self.watcher.unwatch(&dir).map_err(|e| NotifyError::Unwatch {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
