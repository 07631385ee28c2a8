//! Bundle Event Port
//!
//! Provides an observable interface for the bundler. Every log line the
//! bundler produces is a `BundleEvent` with a `Severity`; sinks decide how
//! to render it (terminal, NDJSON, nothing).

use std::path::PathBuf;

use serde::Serialize;

/// Severity of a bundle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Unrecoverable setup failure; the process exits after reporting it
    Fatal,
}

/// What triggered a rebuild pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ChangeSource {
    /// First build after the bundler started
    Startup,
    /// The index file changed
    Index,
    /// A fragment file changed
    Fragment(PathBuf),
}

impl std::fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSource::Startup => write!(f, "script start"),
            ChangeSource::Index => write!(f, "index updated"),
            ChangeSource::Fragment(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Event emitted by the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BundleEvent {
    /// Bundler started for a project
    Started {
        project: String,
        index: PathBuf,
        bundle: PathBuf,
    },
    /// Index read and parsed
    IndexLoaded {
        path: PathBuf,
        segments: usize,
        fragments: usize,
    },
    /// Index could not be re-read after startup; previous state kept
    IndexUnreadable { path: PathBuf, reason: String },
    /// Malformed directive, the instruction was skipped
    ParseWarning { line: usize, message: String },
    /// Change subscription registered
    WatchAdded { path: PathBuf },
    /// Change subscription cancelled
    WatchRemoved { path: PathBuf },
    /// Change subscription could not be registered or cancelled
    WatchFailed { path: PathBuf, reason: String },
    /// A watched fragment changed on disk
    FragmentChanged { path: PathBuf },
    /// A fragment could not be read; a placeholder was spliced instead
    FragmentUnreadable { path: PathBuf, reason: String },
    /// A fragment has no content after processing
    FragmentEmpty { path: PathBuf },
    /// Bundle written
    BundleWritten {
        path: PathBuf,
        bytes: usize,
        source: ChangeSource,
    },
    /// Bundle could not be written; previous bundle left in place
    BundleWriteFailed { path: PathBuf, reason: String },
    /// Setup failure, the bundler cannot run
    Fatal { message: String },
    /// Watch loop stopped
    Shutdown,
}

impl BundleEvent {
    pub fn severity(&self) -> Severity {
        match self {
            BundleEvent::Started { .. }
            | BundleEvent::IndexLoaded { .. }
            | BundleEvent::WatchAdded { .. }
            | BundleEvent::WatchRemoved { .. }
            | BundleEvent::FragmentChanged { .. }
            | BundleEvent::BundleWritten { .. }
            | BundleEvent::Shutdown => Severity::Info,
            BundleEvent::ParseWarning { .. } | BundleEvent::FragmentEmpty { .. } => {
                Severity::Warning
            }
            BundleEvent::IndexUnreadable { .. }
            | BundleEvent::WatchFailed { .. }
            | BundleEvent::FragmentUnreadable { .. }
            | BundleEvent::BundleWriteFailed { .. } => Severity::Error,
            BundleEvent::Fatal { .. } => Severity::Fatal,
        }
    }

    /// Human-readable message, without severity or timestamp
    pub fn message(&self) -> String {
        match self {
            BundleEvent::Started { project, .. } => {
                format!("Bundler started. The current project is \"{}\".", project)
            }
            BundleEvent::IndexLoaded {
                path,
                segments,
                fragments,
            } => format!(
                "Index loaded from {} ({} segments, {} fragments).",
                path.display(),
                segments,
                fragments
            ),
            BundleEvent::IndexUnreadable { path, reason } => format!(
                "Could not read the index at {}. Error: {}",
                path.display(),
                reason
            ),
            BundleEvent::ParseWarning { line, message } => format!("line {}: {}", line, message),
            BundleEvent::WatchAdded { path } => format!("Started watching {}.", path.display()),
            BundleEvent::WatchRemoved { path } => format!("Stopped watching {}.", path.display()),
            BundleEvent::WatchFailed { path, reason } => format!(
                "Failed to watch for {}. Error: {}",
                path.display(),
                reason
            ),
            BundleEvent::FragmentChanged { path } => format!("Changed: {}", path.display()),
            BundleEvent::FragmentUnreadable { path, reason } => format!(
                "The file {} wasn't found. Error: {}",
                path.display(),
                reason
            ),
            BundleEvent::FragmentEmpty { path } => format!("The file {} is empty.", path.display()),
            BundleEvent::BundleWritten {
                path,
                bytes,
                source,
            } => format!(
                "Bundle updated ({} bytes to {}). Source: {}",
                bytes,
                path.display(),
                source
            ),
            BundleEvent::BundleWriteFailed { path, reason } => format!(
                "Failed to write to the bundle file {}. Error: {}",
                path.display(),
                reason
            ),
            BundleEvent::Fatal { message } => message.clone(),
            BundleEvent::Shutdown => "Watch stopped.".to_string(),
        }
    }
}

/// Trait for receiving bundle events
///
/// Implementations can be:
/// - Console rendering in the CLI
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: Silent operation
pub trait BundleEventSink: Send + Sync {
    /// Handle a bundle event
    fn on_event(&self, event: BundleEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BundleEventSink for NoopEventSink {
    fn on_event(&self, _event: BundleEvent) {}
}

/// Event sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<BundleEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<BundleEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of events received with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.events()
            .iter()
            .filter(|e| e.severity() == severity)
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl BundleEventSink for RecordingEventSink {
    fn on_event(&self, event: BundleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
