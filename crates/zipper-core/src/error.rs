//! Error types for packing and unpacking operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while packing or unpacking an archive.
///
/// Every variant is terminal: the operation that produced it stops at once
/// and nothing already written is rolled back.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Inputs are missing or mutually exclusive.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A root, archive or destination directory does not exist.
    #[error("path not found: {path}")]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// An archive name or entry name was rejected.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A walked path is not contained under the root it was walked from.
    #[error("path {path} is not contained in {root}")]
    InvalidPath {
        /// The descendant path.
        path: PathBuf,
        /// The prefix it was expected to start with.
        root: PathBuf,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive container could not be read or written.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry resolves outside the extraction directory.
    #[error("security violation in entry '{entry}': {reason}")]
    SecurityViolation {
        /// Name of the offending entry as stored in the archive.
        entry: String,
        /// What the entry tried to do.
        reason: String,
    },
}

impl ArchiveError {
    /// Builds an `Io` error that keeps the original kind and names the path.
    pub(crate) fn io_at(path: &Path, action: &str, err: &std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            err.kind(),
            format!("failed to {action} {}: {err}", path.display()),
        ))
    }

    /// Returns `true` if this error represents a path confinement violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipper_core::ArchiveError;
    ///
    /// let err = ArchiveError::SecurityViolation {
    ///     entry: "../evil.sh".into(),
    ///     reason: "escapes the destination directory".into(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ArchiveError::InvalidArgument("no files given".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::SecurityViolation { .. })
    }

    /// Returns the filesystem path this error is about, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathNotFound { path } | Self::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
