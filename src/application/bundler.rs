//! Bundler - event-driven orchestration of parse, reconcile and assemble
//!
//! The bundler owns every piece of mutable state: the current parsed index,
//! the fragment store and the watch manager. It is driven one notification
//! at a time, either by [`WatchUseCase`](super::watch::WatchUseCase) or
//! directly by tests through [`Bundler::handle_change`].

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{FragmentId, ParsedIndex};
use crate::domain::ports::{BundleEvent, BundleEventSink, ChangeNotifier, ChangeSource, FileSystem};
use crate::domain::services::{assemble, parse_index};
use crate::domain::value_objects::ProjectLayout;
use crate::error::{BundlerError, BundlerResult};

use super::fragment_store::{FragmentStore, Origin};
use super::watch_manager::{Reconciliation, WatchManager};

/// Summary of one rebuild pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Size of the assembled bundle
    pub bytes: usize,
    /// Fragment references resolved
    pub fragments: usize,
    /// References that resolved to the unreadable placeholder
    pub unreadable: usize,
    /// Whether the bundle file was replaced
    pub written: bool,
}

impl PassReport {
    /// No pass ran (the index could not be re-read)
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Incremental bundler for one project
pub struct Bundler<F, N>
where
    F: FileSystem,
    N: ChangeNotifier,
{
    layout: ProjectLayout,
    fs: F,
    notifier: N,
    sink: Arc<dyn BundleEventSink>,
    index: ParsedIndex,
    store: FragmentStore,
    watches: WatchManager,
    index_watched: bool,
    last_report: PassReport,
}

impl<F, N> Bundler<F, N>
where
    F: FileSystem,
    N: ChangeNotifier,
{
    /// Load the index and produce the first bundle
    ///
    /// Failing to read the index is the only error; everything else is
    /// reported through `sink` and the bundler keeps going.
    pub fn start(
        layout: ProjectLayout,
        fs: F,
        notifier: N,
        sink: Arc<dyn BundleEventSink>,
    ) -> BundlerResult<Self> {
        let text = fs
            .read(&layout.index)
            .map_err(|e| BundlerError::IndexUnreadable {
                path: layout.index.clone(),
                message: e.reason(),
            })?;

        sink.on_event(BundleEvent::Started {
            project: layout.project.clone(),
            index: layout.index.clone(),
            bundle: layout.bundle.clone(),
        });

        let store = FragmentStore::new(layout.fragments.clone());
        let mut bundler = Self {
            layout,
            fs,
            notifier,
            sink,
            index: ParsedIndex::default(),
            store,
            watches: WatchManager::new(),
            index_watched: false,
            last_report: PassReport::default(),
        };

        bundler.watch_index();
        bundler.load_index(&text);
        bundler.rebuild(ChangeSource::Startup);
        Ok(bundler)
    }

    /// Route a change notification
    ///
    /// Paths that are neither the index nor a watched fragment are ignored.
    pub fn handle_change(&mut self, path: &Path) -> Option<PassReport> {
        if path == self.layout.index {
            return Some(self.on_index_changed());
        }
        let id = self.watches.fragment_for(path)?.clone();
        Some(self.on_fragment_changed(&id))
    }

    /// Re-read and reparse the index, then rebuild
    ///
    /// A failed read keeps the previous index and watches untouched.
    pub fn on_index_changed(&mut self) -> PassReport {
        self.watch_index();
        match self.fs.read(&self.layout.index) {
            Ok(text) => {
                self.load_index(&text);
                self.rebuild(ChangeSource::Index)
            }
            Err(err) => {
                self.sink.on_event(BundleEvent::IndexUnreadable {
                    path: self.layout.index.clone(),
                    reason: err.reason(),
                });
                PassReport::skipped()
            }
        }
    }

    /// Drop the cached content of a fragment and rebuild
    pub fn on_fragment_changed(&mut self, id: &FragmentId) -> PassReport {
        let path = self.store.path_of(id);
        self.sink
            .on_event(BundleEvent::FragmentChanged { path: path.clone() });
        self.store.invalidate(id);
        self.rebuild(ChangeSource::Fragment(path))
    }

    /// Assemble the bundle from the current index and write it out
    pub fn rebuild(&mut self, source: ChangeSource) -> PassReport {
        let fs = &self.fs;
        let sink = &self.sink;
        let index = &self.index;
        let store = &mut self.store;
        let watches = &mut self.watches;
        let notifier = &mut self.notifier;
        let mut report = PassReport::default();

        let bundle = assemble(index, |fragment| {
            report.fragments += 1;
            let resolved = store.get(fs, &fragment.id, fragment.left_offset);
            match &resolved.origin {
                Origin::Unreadable { reason } => {
                    report.unreadable += 1;
                    sink.on_event(BundleEvent::FragmentUnreadable {
                        path: resolved.path.clone(),
                        reason: reason.clone(),
                    });
                }
                Origin::Empty => sink.on_event(BundleEvent::FragmentEmpty {
                    path: resolved.path.clone(),
                }),
                Origin::Disk | Origin::Cache => {}
            }
            if resolved.origin.is_fresh() {
                match watches.ensure_watched(&fragment.id, &resolved.path, notifier) {
                    Some(Ok(())) => sink.on_event(BundleEvent::WatchAdded {
                        path: resolved.path.clone(),
                    }),
                    Some(Err(err)) => sink.on_event(BundleEvent::WatchFailed {
                        path: resolved.path.clone(),
                        reason: err.to_string(),
                    }),
                    None => {}
                }
            }
            resolved.content
        });

        report.bytes = bundle.len();
        match self.fs.write(&self.layout.bundle, &bundle) {
            Ok(()) => {
                report.written = true;
                self.sink.on_event(BundleEvent::BundleWritten {
                    path: self.layout.bundle.clone(),
                    bytes: report.bytes,
                    source,
                });
            }
            Err(err) => self.sink.on_event(BundleEvent::BundleWriteFailed {
                path: self.layout.bundle.clone(),
                reason: err.reason(),
            }),
        }

        self.last_report = report.clone();
        report
    }

    /// Retry subscriptions that failed earlier
    ///
    /// A fragment that becomes watchable may have appeared while nothing
    /// was watching it, so its cache entry is dropped and the bundle is
    /// rebuilt. Returns `None` when no retry succeeded. Failures are not
    /// reported again.
    pub fn retry_watches(&mut self) -> Option<PassReport> {
        if !self.index_watched && self.notifier.subscribe(&self.layout.index).is_ok() {
            self.index_watched = true;
            self.sink.on_event(BundleEvent::WatchAdded {
                path: self.layout.index.clone(),
            });
            return Some(self.on_index_changed());
        }
        if self.watches.len() == self.index.required.len() {
            return None;
        }

        let reconciliation =
            self.watches
                .reconcile(&self.index.required, &mut self.store, &mut self.notifier);
        let (_, first) = reconciliation.added.first().cloned()?;
        for (id, path) in reconciliation.added {
            self.store.invalidate(&id);
            self.sink.on_event(BundleEvent::WatchAdded { path });
        }
        Some(self.rebuild(ChangeSource::Fragment(first)))
    }

    fn load_index(&mut self, text: &str) {
        let outcome = parse_index(text);
        for diagnostic in &outcome.diagnostics {
            self.sink.on_event(BundleEvent::ParseWarning {
                line: diagnostic.line,
                message: diagnostic.message(),
            });
        }
        self.index = outcome.index;
        self.sink.on_event(BundleEvent::IndexLoaded {
            path: self.layout.index.clone(),
            segments: self.index.segment_count(),
            fragments: self.index.required.len(),
        });

        let reconciliation =
            self.watches
                .reconcile(&self.index.required, &mut self.store, &mut self.notifier);
        self.report_reconciliation(reconciliation);
    }

    fn report_reconciliation(&self, reconciliation: Reconciliation) {
        for (_, path) in reconciliation.removed {
            self.sink.on_event(BundleEvent::WatchRemoved { path });
        }
        for (_, path) in reconciliation.added {
            self.sink.on_event(BundleEvent::WatchAdded { path });
        }
        for (_, err) in reconciliation.failed {
            self.sink.on_event(BundleEvent::WatchFailed {
                path: err.path().to_path_buf(),
                reason: err.to_string(),
            });
        }
    }

    fn watch_index(&mut self) {
        if self.index_watched {
            return;
        }
        match self.notifier.subscribe(&self.layout.index) {
            Ok(()) => self.index_watched = true,
            Err(err) => self.sink.on_event(BundleEvent::WatchFailed {
                path: self.layout.index.clone(),
                reason: err.to_string(),
            }),
        }
    }

    pub fn parsed_index(&self) -> &ParsedIndex {
        &self.index
    }

    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    pub fn watches(&self) -> &WatchManager {
        &self.watches
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Report of the most recent rebuild pass
    pub fn last_report(&self) -> &PassReport {
        &self.last_report
    }
}
