//! Configuration for pack and unpack operations.
//!
//! Each operation takes one immutable configuration value, built up front
//! with the `with_*` methods and never changed while the operation runs.

use crate::ArchiveError;
use crate::Result;
use crate::walker;
use std::path::PathBuf;

/// Size of the buffer used to stream bytes into and out of the archive.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Configuration for packing paths into an archive.
///
/// # Examples
///
/// ```
/// use zipper_core::PackConfig;
///
/// let config = PackConfig::default()
///     .with_block_size(64 * 1024)
///     .with_follow_symlinks(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Number of bytes copied per read/write cycle.
    ///
    /// Default: 1024.
    pub block_size: usize,

    /// Follow symbolic links while walking roots.
    ///
    /// Default: `false`. Links below a root are skipped and reported. When
    /// enabled, a link that points back at one of its ancestors aborts the
    /// pack with an I/O error instead of looping.
    pub follow_symlinks: bool,

    /// Write an empty archive when there are no roots.
    ///
    /// Default: `false`, where an empty root list is an `InvalidArgument`
    /// error. Packing everything in an empty working directory sets it.
    pub allow_empty: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            follow_symlinks: false,
            allow_empty: false,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the streaming block size.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether an empty root list produces an empty archive.
    #[must_use]
    pub fn with_allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the block size is zero.
    pub fn validate(&self) -> Result<()> {
        validate_block_size(self.block_size)
    }
}

/// Configuration for unpacking an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Number of bytes copied per read/write cycle.
    ///
    /// Default: 1024.
    pub block_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl ExtractConfig {
    /// Creates a new `ExtractConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the streaming block size.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the block size is zero.
    pub fn validate(&self) -> Result<()> {
        validate_block_size(self.block_size)
    }
}

fn validate_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 {
        return Err(ArchiveError::InvalidArgument(
            "block size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// The set of roots handed to the packer.
///
/// Explicit paths and "everything in the working directory" are mutually
/// exclusive, so they are two variants rather than two flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sources {
    /// Paths named by the user, packed in the given order.
    Paths(Vec<PathBuf>),

    /// Every immediate child of the given directory.
    ///
    /// An empty directory resolves to no roots; pack it with
    /// [`PackConfig::allow_empty`] to get an empty archive.
    WorkingDirectory(PathBuf),
}

impl Sources {
    /// Resolves the sources into the ordered list of roots to walk.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if an explicit path list is empty
    /// - `PathNotFound` if the working directory does not exist
    /// - `Io` if the working directory cannot be listed
    ///
    /// # Examples
    ///
    /// ```
    /// use zipper_core::Sources;
    /// use std::path::PathBuf;
    ///
    /// let roots = Sources::Paths(vec![PathBuf::from("a.txt")]).resolve().unwrap();
    /// assert_eq!(roots, vec![PathBuf::from("a.txt")]);
    ///
    /// assert!(Sources::Paths(Vec::new()).resolve().is_err());
    /// ```
    pub fn resolve(self) -> Result<Vec<PathBuf>> {
        match self {
            Self::Paths(paths) => {
                if paths.is_empty() {
                    return Err(ArchiveError::InvalidArgument(
                        "no files given to pack".to_string(),
                    ));
                }
                Ok(paths)
            }
            Self::WorkingDirectory(dir) => walker::working_dir_roots(&dir),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pack_config_defaults() {
        let config = PackConfig::default();
        assert_eq!(config.block_size, 1024);
        assert!(!config.follow_symlinks);
        assert!(!config.allow_empty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let err = PackConfig::default().with_block_size(0).validate();
        assert!(matches!(err, Err(ArchiveError::InvalidArgument(_))));

        let err = ExtractConfig::default().with_block_size(0).validate();
        assert!(matches!(err, Err(ArchiveError::InvalidArgument(_))));
    }

    #[test]
    fn test_extract_config_builder() {
        let config = ExtractConfig::new().with_block_size(4096);
        assert_eq!(config.block_size, 4096);
    }

    #[test]
    fn test_sources_empty_paths() {
        let result = Sources::Paths(Vec::new()).resolve();
        assert!(matches!(result, Err(ArchiveError::InvalidArgument(_))));
    }

    #[test]
    fn test_sources_working_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();

        let roots = Sources::WorkingDirectory(temp.path().to_path_buf())
            .resolve()
            .unwrap();

        assert_eq!(roots, vec![temp.path().join("a"), temp.path().join("b.txt")]);
    }
}
