//! Error conversion utilities for CLI.
//!
//! Converts zipper-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use zipper_core::ArchiveError;

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
///
/// `archive` is the archive being written (pack) or read (unpack).
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SecurityViolation { entry, reason } => {
            anyhow!(
                "Security violation: entry '{entry}' in '{}' was rejected: {reason}\n\
                 HINT: This archive may be malicious. Do not unpack it from untrusted sources.",
                archive.display()
            )
        }
        ArchiveError::PathNotFound { path } => {
            anyhow!(
                "Path not found: {}\n\
                 HINT: Check the spelling. Output and destination directories must already exist.",
                path.display()
            )
        }
        ArchiveError::InvalidName { name, reason } => {
            anyhow!(
                "Invalid name '{name}': {reason}\n\
                 HINT: Give the archive name without the .zip extension or any directory."
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or is not a ZIP file.",
                archive.display()
            )
        }
        ArchiveError::InvalidArgument(reason) => anyhow!("{reason}"),
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                archive.display()
            )
        }
        other @ ArchiveError::InvalidPath { .. } => anyhow::Error::from(other)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
