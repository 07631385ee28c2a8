//! Watch Use Case implementation

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::bundler::Bundler;
use crate::domain::ports::{BundleEvent, BundleEventSink, ChangeNotifier, FileSystem};
use crate::error::BundlerResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::notify::PollNotifier;

use super::event::{WatchOptions, WatcherState};

/// How long one receive waits before the running flag is re-checked
const RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// Watch Use Case
///
/// Orchestrates continuous watching with rebuild on change.
/// This is the main entry point for the `auaust watch` command.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching the local disk (blocking)
    ///
    /// This method blocks until the running flag is set to false.
    pub fn start(
        &self,
        running: Arc<AtomicBool>,
        sink: Arc<dyn BundleEventSink>,
    ) -> BundlerResult<()> {
        let (tx, rx) = channel();
        let notifier = match PollNotifier::new(tx, self.options.poll_interval) {
            Ok(notifier) => notifier,
            Err(err) => {
                sink.on_event(BundleEvent::Fatal {
                    message: err.to_string(),
                });
                return Err(err);
            }
        };
        self.run(LocalFs::new(), notifier, rx, running, sink)
    }

    /// Run the watch loop over any file system and notifier
    ///
    /// `changes` receives the paths the notifier reports.
    pub fn run<F, N>(
        &self,
        fs: F,
        notifier: N,
        changes: Receiver<PathBuf>,
        running: Arc<AtomicBool>,
        sink: Arc<dyn BundleEventSink>,
    ) -> BundlerResult<()>
    where
        F: FileSystem,
        N: ChangeNotifier,
    {
        let mut bundler =
            match Bundler::start(self.options.layout.clone(), fs, notifier, sink.clone()) {
                Ok(bundler) => bundler,
                Err(err) => {
                    sink.on_event(BundleEvent::Fatal {
                        message: err.to_string(),
                    });
                    return Err(err);
                }
            };

        let mut state = WatcherState::new(self.options.debounce);
        let mut last_retry = Instant::now();

        while running.load(Ordering::SeqCst) {
            match changes.recv_timeout(RECV_TIMEOUT) {
                Ok(path) => {
                    state.add_change(path);
                    while let Ok(path) = changes.try_recv() {
                        state.add_change(path);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // Nothing more can arrive; skip the quiet period.
                    self.flush(&mut bundler, &mut state);
                    break;
                }
            }

            if state.should_sync() {
                self.flush(&mut bundler, &mut state);
            }
            if last_retry.elapsed() >= self.options.poll_interval {
                bundler.retry_watches();
                last_retry = Instant::now();
            }
        }

        sink.on_event(BundleEvent::Shutdown);
        Ok(())
    }

    fn flush<F, N>(&self, bundler: &mut Bundler<F, N>, state: &mut WatcherState)
    where
        F: FileSystem,
        N: ChangeNotifier,
    {
        for path in state.take_changes(&self.options.layout.index) {
            bundler.handle_change(&path);
        }
    }
}
