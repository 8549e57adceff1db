//! Archive entry names and archive file names.
//!
//! Entry names are computed from the walked filesystem path by stripping the
//! parent directory of the root the path was found under, so packing
//! `/home/u/dir` produces names starting with `dir/`. Names are always
//! joined with `/`, whatever the host separator is.

use crate::ArchiveError;
use crate::Result;
use crate::types::EntryKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Extension appended to archive base names.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Longest accepted archive base name, in bytes.
pub const MAX_ARCHIVE_NAME_LEN: usize = 255;

#[cfg(windows)]
const FORBIDDEN_NAME_CHARS: &[char] = &[':', '/', '\\', '"', '*', '<', '>', '?', '|', '\0'];

#[cfg(not(windows))]
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\0'];

/// Makes a user-supplied root absolute without resolving symlinks.
///
/// A root whose last component is `..` (or that has no last component at
/// all, like `/`) has no meaningful name of its own, so it is canonicalized
/// instead.
///
/// # Errors
///
/// Returns `Io` if the current directory cannot be read or the path cannot
/// be canonicalized.
pub fn absolute_root(root: &Path) -> Result<PathBuf> {
    let absolute =
        std::path::absolute(root).map_err(|e| ArchiveError::io_at(root, "resolve", &e))?;

    if absolute.file_name().is_some() {
        return Ok(absolute);
    }

    absolute
        .canonicalize()
        .map_err(|e| ArchiveError::io_at(root, "canonicalize", &e))
}

/// Computes the archive entry name of `path`, found while walking `root`.
///
/// The parent directory of `root` is stripped from `path` and the remaining
/// components are joined with `/`. Directory names get a trailing `/`.
///
/// # Errors
///
/// - `InvalidPath` if `path` does not lie under the parent of `root`, or
///   nothing is left once the prefix is stripped
/// - `InvalidName` if a component is not valid UTF-8 or contains `\`
///
/// # Examples
///
/// ```
/// use zipper_core::names::entry_name;
/// use zipper_core::types::EntryKind;
/// use std::path::Path;
///
/// let root = Path::new("/data/dir");
/// let name = entry_name(root, Path::new("/data/dir/indir/file1.txt"), EntryKind::File)?;
/// assert_eq!(name, "dir/indir/file1.txt");
///
/// let name = entry_name(Path::new("/data/ch"), Path::new("/data/ch/a/b"), EntryKind::Directory)?;
/// assert_eq!(name, "ch/a/b/");
/// # Ok::<(), zipper_core::ArchiveError>(())
/// ```
pub fn entry_name(root: &Path, path: &Path, kind: EntryKind) -> Result<String> {
    let prefix = root.parent().unwrap_or(root);
    let invalid_path = || ArchiveError::InvalidPath {
        path: path.to_path_buf(),
        root: prefix.to_path_buf(),
    };

    let relative = path.strip_prefix(prefix).map_err(|_| invalid_path())?;

    let mut name = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| ArchiveError::InvalidName {
                    name: relative.to_string_lossy().into_owned(),
                    reason: "entry names must be valid UTF-8".to_string(),
                })?;
                if part.contains('\\') {
                    return Err(ArchiveError::InvalidName {
                        name: relative.to_string_lossy().into_owned(),
                        reason: "entry names must not contain '\\'".to_string(),
                    });
                }
                if !name.is_empty() {
                    name.push('/');
                }
                name.push_str(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid_path());
            }
        }
    }

    if name.is_empty() {
        return Err(invalid_path());
    }

    if kind.is_directory() {
        name.push('/');
    }

    Ok(name)
}

/// Checks an archive base name before `.zip` is appended.
///
/// The name must be non-empty, at most 255 bytes long, and free of the
/// characters the host filesystem forbids in a file name. `/` is rejected
/// everywhere: a base name never carries a directory.
///
/// # Errors
///
/// Returns `InvalidName` describing the first problem found.
///
/// # Examples
///
/// ```
/// use zipper_core::names::validate_archive_name;
///
/// assert!(validate_archive_name("backup-2024").is_ok());
/// assert!(validate_archive_name("").is_err());
/// assert!(validate_archive_name("na/me").is_err());
/// ```
pub fn validate_archive_name(name: &str) -> Result<()> {
    let invalid = |reason: String| ArchiveError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("archive name is empty".to_string()));
    }

    if name.len() > MAX_ARCHIVE_NAME_LEN {
        return Err(invalid(format!(
            "archive name is longer than {MAX_ARCHIVE_NAME_LEN} bytes"
        )));
    }

    if let Some(ch) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(invalid(format!("contains forbidden character {ch:?}")));
    }

    Ok(())
}

/// Appends the archive extension to a base name.
///
/// # Examples
///
/// ```
/// use zipper_core::names::archive_file_name;
///
/// assert_eq!(archive_file_name("test2"), "test2.zip");
/// ```
#[must_use]
pub fn archive_file_name(base: &str) -> String {
    format!("{base}.{ARCHIVE_EXTENSION}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_name_file_root() {
        let root = Path::new("/inputs/pic1.png");
        let name = entry_name(root, root, EntryKind::File).unwrap();
        assert_eq!(name, "pic1.png");
    }

    #[test]
    fn test_entry_name_nested_file() {
        let root = Path::new("/inputs/dir");
        let name = entry_name(root, Path::new("/inputs/dir/indir/file1.txt"), EntryKind::File)
            .unwrap();
        assert_eq!(name, "dir/indir/file1.txt");
    }

    #[test]
    fn test_entry_name_empty_dir_root() {
        let root = Path::new("/inputs/ch/a/b");
        let name = entry_name(root, root, EntryKind::Directory).unwrap();
        assert_eq!(name, "b/");
    }

    #[test]
    fn test_entry_name_directory_has_trailing_slash() {
        let root = Path::new("/inputs/ch");
        let name = entry_name(root, Path::new("/inputs/ch/a/b"), EntryKind::Directory).unwrap();
        assert_eq!(name, "ch/a/b/");
        assert!(!name.contains('\\'));
    }

    #[test]
    fn test_entry_name_outside_root() {
        let root = Path::new("/inputs/dir");
        let result = entry_name(root, Path::new("/elsewhere/file.txt"), EntryKind::File);
        assert!(matches!(result, Err(ArchiveError::InvalidPath { .. })));
    }

    #[test]
    fn test_entry_name_nothing_left() {
        let root = Path::new("/inputs/dir");
        let result = entry_name(root, Path::new("/inputs"), EntryKind::Directory);
        assert!(matches!(result, Err(ArchiveError::InvalidPath { .. })));
    }

    #[test]
    fn test_entry_name_filesystem_root() {
        let root = Path::new("/");
        let name = entry_name(root, Path::new("/etc/hosts"), EntryKind::File).unwrap();
        assert_eq!(name, "etc/hosts");
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_name_rejects_backslash_component() {
        let root = Path::new("/inputs/dir");
        let result = entry_name(root, Path::new("/inputs/dir/a\\b.txt"), EntryKind::File);
        assert!(matches!(result, Err(ArchiveError::InvalidName { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_name_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/inputs/dir");
        let path = root.join(OsStr::from_bytes(b"bad\xff.txt"));
        let result = entry_name(root, &path, EntryKind::File);
        assert!(matches!(result, Err(ArchiveError::InvalidName { .. })));
    }

    #[test]
    fn test_absolute_root_relative_path() {
        let root = absolute_root(Path::new("some/dir")).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("some/dir"));
    }

    #[test]
    fn test_absolute_root_parent_dir_is_canonicalized() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        let root = absolute_root(&nested.join("..")).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
        assert!(root.file_name().is_some());
    }

    #[test]
    fn test_validate_archive_name_valid() {
        assert!(validate_archive_name("test1").is_ok());
        assert!(validate_archive_name("vide-o").is_ok());
        assert!(validate_archive_name("архив").is_ok());
    }

    #[test]
    fn test_validate_archive_name_empty() {
        let result = validate_archive_name("");
        assert!(matches!(result, Err(ArchiveError::InvalidName { .. })));
    }

    #[test]
    fn test_validate_archive_name_too_long() {
        assert!(validate_archive_name(&"a".repeat(255)).is_ok());
        assert!(validate_archive_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_archive_name_forbidden_chars() {
        assert!(validate_archive_name("na/me").is_err());
        assert!(validate_archive_name("na\0me").is_err());
    }

    #[cfg(windows)]
    #[test]
    fn test_validate_archive_name_windows_chars() {
        for name in ["na:me", "na\\me", "a*b", "a?b", "a|b", "a<b", "a>b", "a\"b"] {
            assert!(validate_archive_name(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name("test1"), "test1.zip");
    }
}
