//! Watch manager - keeps notifier subscriptions equal to the required set
//!
//! The watched set only ever contains fragments whose subscription
//! succeeded. A failed subscription is reported and retried on the next
//! reconciliation.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::domain::entities::{FragmentId, RequiredSet};
use crate::domain::ports::{ChangeNotifier, NotifyError, NotifyResult};
use crate::domain::value_objects::FragmentKind;

use super::fragment_store::FragmentStore;

/// Outcome of a reconciliation against a new required set
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Newly subscribed fragments
    pub added: Vec<(FragmentId, PathBuf)>,
    /// Unsubscribed fragments (always removed from the watched set)
    pub removed: Vec<(FragmentId, PathBuf)>,
    /// Subscriptions or unsubscriptions the notifier rejected
    pub failed: Vec<(FragmentId, NotifyError)>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }
}

/// Set of fragments with an active change subscription
#[derive(Debug, Default)]
pub struct WatchManager {
    by_id: BTreeMap<FragmentId, PathBuf>,
    by_path: HashMap<PathBuf, FragmentId>,
}

impl WatchManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subscriptions match `required`
    ///
    /// Fragments leaving the set are unsubscribed and purged from `store`.
    /// Fragments entering it are subscribed. Running this twice with the
    /// same set changes nothing the second time.
    pub fn reconcile<N: ChangeNotifier + ?Sized>(
        &mut self,
        required: &RequiredSet,
        store: &mut FragmentStore,
        notifier: &mut N,
    ) -> Reconciliation {
        let mut outcome = Reconciliation::default();

        let leaving: Vec<FragmentId> = self
            .by_id
            .keys()
            .filter(|id| !required.contains(id))
            .cloned()
            .collect();
        for id in leaving {
            let Some(path) = self.by_id.remove(&id) else {
                continue;
            };
            self.by_path.remove(&path);
            if let Err(err) = notifier.unsubscribe(&path) {
                outcome.failed.push((id.clone(), err));
            }
            outcome.removed.push((id, path));
        }
        store.retain_required(required);

        let entering: Vec<FragmentId> = required
            .iter()
            .filter(|id| !self.by_id.contains_key(id))
            .collect();
        for id in entering {
            let path = store.path_of(&id);
            match self.subscribe(&id, &path, notifier) {
                Ok(()) => outcome.added.push((id, path)),
                Err(err) => outcome.failed.push((id, err)),
            }
        }

        outcome
    }

    /// Subscribe to a fragment unless it is already watched
    ///
    /// Returns `None` when nothing had to be done.
    pub fn ensure_watched<N: ChangeNotifier + ?Sized>(
        &mut self,
        id: &FragmentId,
        path: &Path,
        notifier: &mut N,
    ) -> Option<NotifyResult<()>> {
        if self.by_id.contains_key(id) {
            return None;
        }
        Some(self.subscribe(id, path, notifier))
    }

    fn subscribe<N: ChangeNotifier + ?Sized>(
        &mut self,
        id: &FragmentId,
        path: &Path,
        notifier: &mut N,
    ) -> NotifyResult<()> {
        notifier.subscribe(path)?;
        self.by_id.insert(id.clone(), path.to_path_buf());
        self.by_path.insert(path.to_path_buf(), id.clone());
        Ok(())
    }

    /// Fragment a changed path belongs to
    pub fn fragment_for(&self, path: &Path) -> Option<&FragmentId> {
        self.by_path.get(path)
    }

    pub fn is_watched(&self, id: &FragmentId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Watched names of one kind, sorted
    pub fn watched(&self, kind: FragmentKind) -> Vec<&str> {
        self.by_id
            .keys()
            .filter(|id| id.kind == kind)
            .map(|id| id.name.as_str())
            .collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.by_id.values().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
