//! Auaust - incremental source bundler
//!
//! Auaust watches a project's index file, reads the `AUAUST` directive
//! blocks in it, and splices local and global fragments around the index
//! text into a single bundle. Only the pieces that changed are re-read.
//!
//! ## Layers
//!
//! - `domain` - parser, fragment transform, assembler and the ports they need
//! - `application` - the `Bundler` orchestrator and the watch loop
//! - `infrastructure` - local/in-memory file systems, notifiers, event sinks
//! - `config` - `auaust.toml` loading with env overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{Bundler, PassReport, WatchOptions, WatchUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{FragmentId, ParsedIndex, Segment};
pub use domain::services::{assemble, parse_index, process_fragment, ParseOutcome};
pub use domain::value_objects::{FragmentKind, Placement, ProjectLayout};
pub use error::{BundlerError, BundlerResult};
