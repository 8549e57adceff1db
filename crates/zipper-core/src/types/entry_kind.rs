//! Kind of a walked node or archive entry.

/// Whether a node or entry is a regular file or a directory.
///
/// Symbolic links never reach the archive: they are either followed (and
/// show up as the kind of their target) or skipped by the walker.
///
/// # Examples
///
/// ```
/// use zipper_core::types::EntryKind;
///
/// assert!(EntryKind::Directory.is_directory());
/// assert_eq!(EntryKind::from_entry_name("docs/"), EntryKind::Directory);
/// assert_eq!(EntryKind::from_entry_name("docs/a.txt"), EntryKind::File);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file with content.
    File,

    /// Directory without content.
    Directory,
}

impl EntryKind {
    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Infers the kind from a stored entry name.
    ///
    /// Directory entries end with a separator. Both `/` and `\` are
    /// accepted so archives written on Windows by other tools are read
    /// correctly.
    #[must_use]
    pub fn from_entry_name(name: &str) -> Self {
        if name.ends_with('/') || name.ends_with('\\') {
            Self::Directory
        } else {
            Self::File
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}
