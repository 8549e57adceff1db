//! Path confinement for extracted entries.

use crate::ArchiveError;
use crate::Result;
use crate::types::DestDir;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// Resolves a stored entry name to its destination path under `dest`.
///
/// The name is split on both `/` and `\`. Empty and `.` segments are
/// dropped and `..` removes the previous segment. The entry is rejected
/// when it:
/// - contains a NUL byte
/// - starts with a separator or a drive marker such as `C:`
/// - climbs above the destination with `..`
/// - resolves, once the existing part of the path is canonicalized,
///   outside the destination (for example through a symbolic link already
///   on disk, or a dangling one)
///
/// The returned path is the lexical candidate `dest/<segments>`; it may be
/// `dest` itself.
///
/// # Errors
///
/// - `SecurityViolation` naming the entry for every case above
/// - `Io` if an existing ancestor cannot be canonicalized
///
/// # Examples
///
/// ```no_run
/// use zipper_core::security::resolve_entry;
/// use zipper_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("restored")?;
///
/// let path = resolve_entry("dir/indir/file1.txt", &dest)?;
/// assert!(path.starts_with(dest.as_path()));
///
/// assert!(resolve_entry("../../etc/passwd", &dest).is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve_entry(name: &str, dest: &DestDir) -> Result<PathBuf> {
    let violation = |reason: &str| ArchiveError::SecurityViolation {
        entry: name.to_string(),
        reason: reason.to_string(),
    };

    if name.contains('\0') {
        return Err(violation("entry name contains a NUL byte"));
    }

    if name.starts_with('/') || name.starts_with('\\') {
        return Err(violation("entry name is absolute"));
    }

    let mut segments: Vec<&str> = Vec::new();
    for (index, segment) in name.split(['/', '\\']).enumerate() {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(violation("entry escapes the destination directory"));
                }
            }
            normal => {
                if index == 0 && is_drive_prefix(normal) {
                    return Err(violation("entry name starts with a drive prefix"));
                }
                segments.push(normal);
            }
        }
    }

    let candidate = segments
        .iter()
        .fold(dest.as_path().to_path_buf(), |path, segment| path.join(segment));

    match soft_canonicalize(&candidate)? {
        Some(resolved) if dest.contains(&resolved) => Ok(candidate),
        Some(_) => Err(violation("entry resolves outside the destination directory")),
        None => Err(violation("entry passes through a dangling symbolic link")),
    }
}

/// Canonicalizes the longest existing prefix of `path` and appends the rest.
///
/// Returns `Ok(None)` if the walk up the path meets a symbolic link whose
/// target does not exist: writing through it would create a file wherever
/// the link points.
fn soft_canonicalize(path: &Path) -> Result<Option<PathBuf>> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(canonical) => {
                let resolved = missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc, part| acc.join(part));
                return Ok(Some(resolved));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if existing.symlink_metadata().is_ok() {
                    return Ok(None);
                }
                let (Some(parent), Some(file_name)) = (existing.parent(), existing.file_name())
                else {
                    return Err(ArchiveError::io_at(existing, "canonicalize", &e));
                };
                missing.push(file_name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(ArchiveError::io_at(existing, "canonicalize", &e)),
        }
    }
}

fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
