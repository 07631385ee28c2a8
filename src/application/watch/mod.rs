//! Watch Use Case
//!
//! Continuous watching with rebuild on change. It orchestrates:
//! - Change notification (via `notify::PollWatcher`)
//! - Debouncing (100ms default)
//! - One bundler pass per changed path, index first
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(layout);
//! let use_case = WatchUseCase::new(options);
//! use_case.start(running, sink)?;
//! ```

mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use event::{WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
