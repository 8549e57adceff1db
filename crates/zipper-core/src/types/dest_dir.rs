//! Validated extraction destination.

use crate::ArchiveError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// The destination directory of one extraction.
///
/// Once constructed, a `DestDir` is an existing directory represented by
/// its absolute canonical path. Every path written during the extraction
/// must resolve to this directory or below it.
///
/// # Examples
///
/// ```no_run
/// use zipper_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("restored")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` after validating the path.
    ///
    /// There is a window between the checks here and the writes performed
    /// later in which the directory could be swapped for a link. Every
    /// entry is therefore re-checked against the canonical path before it
    /// is written.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the path does not exist
    /// - `Io` if it is not a directory
    /// - `Io` if it cannot be canonicalized
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ArchiveError::PathNotFound { path });
        }

        if !path.is_dir() {
            return Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| ArchiveError::io_at(&path, "canonicalize", &e))?;

        Ok(Self(canonical))
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if `path` is this directory or nested below it.
    ///
    /// The comparison is component-wise, so `/out-evil` is not inside
    /// `/out`.
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}
