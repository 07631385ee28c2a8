//! Terminal presentation for the `auaust` binary
//!
//! - `views/` - renderers for each command's output
//! - `sink` - console implementation of `BundleEventSink`
//! - `context` - resolved color/unicode/verbosity settings

pub mod blocks;
pub mod context;
pub mod json;
pub mod primitives;
pub mod sink;
pub mod terminal;
pub mod theme;
pub mod views;
