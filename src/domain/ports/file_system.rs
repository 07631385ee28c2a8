//! FileSystem port - abstraction over file I/O operations
//!
//! This trait allows the bundler to read the index and fragments and to
//! write the bundle without depending on a concrete implementation
//! (local disk, in-memory for tests).

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// Content is not valid UTF-8
    InvalidUtf8(PathBuf),
    /// I/O error
    Io(std::io::Error),
}

impl FsError {
    /// Convert an I/O error, keeping the path it happened on
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => FsError::InvalidUtf8(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }

    /// Short failure reason without the path, used in placeholders
    pub fn reason(&self) -> String {
        match self {
            FsError::NotFound(_) => "no such file".to_string(),
            FsError::PermissionDenied(_) => "permission denied".to_string(),
            FsError::InvalidUtf8(_) => "not valid UTF-8".to_string(),
            FsError::Io(err) => err.to_string(),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::from_io(err, Path::new(""))
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::InvalidUtf8(path) => write!(f, "Invalid UTF-8 in {}", path.display()),
            FsError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MemoryFs` - in-memory for testing
pub trait FileSystem {
    /// Read file content as UTF-8
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace the whole content of a file atomically
    ///
    /// On failure the previous content must be left untouched.
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;
}
