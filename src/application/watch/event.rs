//! Watch options and debounce state

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::domain::value_objects::ProjectLayout;
use crate::infrastructure::notify::DEFAULT_POLL_INTERVAL;

/// Default debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Paths of the project being bundled
    pub layout: ProjectLayout,
    /// How often the poller checks modification times
    pub poll_interval: Duration,
    /// Quiet period before pending changes are processed
    pub debounce: Duration,
}

impl WatchOptions {
    /// Create new watch options with default timings
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            poll_interval: DEFAULT_POLL_INTERVAL,
            debounce: Duration::from_millis(DEBOUNCE_MS),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    /// Create a new watcher state
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: BTreeSet::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_sync(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= self.debounce
        } else {
            false
        }
    }

    /// Take all pending changes, resetting state
    ///
    /// `first` (the index) is moved to the front when present; the rest
    /// come back in path order.
    pub fn take_changes(&mut self, first: &Path) -> Vec<PathBuf> {
        let mut changes: Vec<PathBuf> = std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect();
        if let Some(pos) = changes.iter().position(|p| p == first) {
            let index = changes.remove(pos);
            changes.insert(0, index);
        }
        self.last_change = None;
        changes
    }

    /// Check if there are pending changes
    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
