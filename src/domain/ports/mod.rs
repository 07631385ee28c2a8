//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod bundle_events;
pub mod change_notifier;
pub mod file_system;

pub use bundle_events::{
    BundleEvent, BundleEventSink, ChangeSource, NoopEventSink, RecordingEventSink, Severity,
};
pub use change_notifier::{ChangeNotifier, NoopNotifier, NotifyError, NotifyResult};
pub use file_system::{FileSystem, FsError, FsResult};
