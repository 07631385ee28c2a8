//! Recording change notifier
//!
//! Delivers nothing on its own. Keeps the set of live subscriptions and the
//! full call history so tests can assert on exactly what the bundler asked
//! for, then feed changes back through `Bundler::handle_change`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::{ChangeNotifier, NotifyError, NotifyResult};

/// One call made on the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Subscribe(PathBuf),
    Unsubscribe(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    subscribed: BTreeSet<PathBuf>,
    calls: Vec<NotifierCall>,
    failing: BTreeSet<PathBuf>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject future subscriptions to `path`
    pub fn fail_on(&mut self, path: impl Into<PathBuf>) {
        self.failing.insert(path.into());
    }

    pub fn stop_failing(&mut self, path: impl AsRef<Path>) {
        self.failing.remove(path.as_ref());
    }

    pub fn is_subscribed(&self, path: impl AsRef<Path>) -> bool {
        self.subscribed.contains(path.as_ref())
    }

    pub fn subscriptions(&self) -> &BTreeSet<PathBuf> {
        &self.subscribed
    }

    pub fn calls(&self) -> &[NotifierCall] {
        &self.calls
    }

    /// Number of subscribe calls made for `path`
    pub fn subscribe_count(&self, path: impl AsRef<Path>) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, NotifierCall::Subscribe(p) if p == path.as_ref()))
            .count()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn subscribe(&mut self, path: &Path) -> NotifyResult<()> {
        self.calls.push(NotifierCall::Subscribe(path.to_path_buf()));
        if self.failing.contains(path) {
            return Err(NotifyError::Watch {
                path: path.to_path_buf(),
                message: "subscription rejected".to_string(),
            });
        }
        self.subscribed.insert(path.to_path_buf());
        Ok(())
    }

    fn unsubscribe(&mut self, path: &Path) -> NotifyResult<()> {
        self.calls.push(NotifierCall::Unsubscribe(path.to_path_buf()));
        self.subscribed.remove(path);
        Ok(())
    }
}
