//! Event Sink Implementations
//!
//! Provides concrete implementations of BundleEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! Human-readable rendering lives with the binary's `ui` module.

mod json;

pub use json::JsonEventSink;
