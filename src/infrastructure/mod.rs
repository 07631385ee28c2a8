//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `notify/` - Change notifiers (Poll, Recording)
//! - `events/` - Event sinks (JSON)

pub mod events;
pub mod fs;
pub mod notify;

// Re-export for convenience
pub use self::events::JsonEventSink;
pub use self::fs::{LocalFs, MemoryFs};
pub use self::notify::{NotifierCall, PollNotifier, RecordingNotifier};
