//! Error types for auaust
//!
//! Uses `thiserror` for library errors. Only setup failures surface as
//! `BundlerError`; everything that happens inside a rebuild pass degrades
//! into events on the `BundleEventSink` instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundler operations
pub type BundlerResult<T> = Result<T, BundlerError>;

/// Main error type for bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// No project identifier was configured
    #[error("no project configured - set CURRENT_PROJECT, pass --project or add [project] id to auaust.toml")]
    MissingProjectId,

    /// The index file could not be read when the bundler started
    #[error("could not read the index at {path}: {message}")]
    IndexUnreadable { path: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Change notification backend failure
    #[error("file watcher error: {0}")]
    Notify(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
