//! Change notifier implementations

mod poll;
mod recording;

pub use poll::{PollNotifier, DEFAULT_POLL_INTERVAL};
pub use recording::{NotifierCall, RecordingNotifier};
