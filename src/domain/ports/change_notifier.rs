//! ChangeNotifier port - "watch a path, be told when it changes"
//!
//! Subscriptions are keyed by path. Notifications are not delivered through
//! this trait: implementations push changed paths into a channel owned by
//! the watch loop, which hands them to the bundler one at a time.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for notifier operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Subscription errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The backend refused to watch the path
    #[error("cannot watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// The backend failed to stop watching the path
    #[error("cannot stop watching {path}: {message}")]
    Unwatch { path: PathBuf, message: String },
}

impl NotifyError {
    pub fn path(&self) -> &Path {
        match self {
            NotifyError::Watch { path, .. } | NotifyError::Unwatch { path, .. } => path,
        }
    }
}

/// Change subscription capability
///
/// Implementations:
/// - `PollNotifier` - modification-time polling via `notify::PollWatcher`
/// - `RecordingNotifier` - in-memory, records subscriptions for tests
/// - `NoopNotifier` - accepts everything, for one-shot builds
pub trait ChangeNotifier {
    /// Start delivering change notifications for `path`
    ///
    /// Subscribing to an already subscribed path is not an error.
    fn subscribe(&mut self, path: &Path) -> NotifyResult<()>;

    /// Stop delivering change notifications for `path`
    fn unsubscribe(&mut self, path: &Path) -> NotifyResult<()>;
}

impl<N: ChangeNotifier + ?Sized> ChangeNotifier for Box<N> {
    fn subscribe(&mut self, path: &Path) -> NotifyResult<()> {
        (**self).subscribe(path)
    }

    fn unsubscribe(&mut self, path: &Path) -> NotifyResult<()> {
        (**self).unsubscribe(path)
    }
}

/// Notifier that accepts every subscription and never reports a change
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn subscribe(&mut self, _path: &Path) -> NotifyResult<()> {
        Ok(())
    }

    fn unsubscribe(&mut self, _path: &Path) -> NotifyResult<()> {
        Ok(())
    }
}
