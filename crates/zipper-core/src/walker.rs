//! Directory tree walking for archive packing.
//!
//! Non-empty directories are represented only through their descendants;
//! a directory whose subtree produces no entry at all is reported as an
//! entry of its own so that it survives the round trip through the archive.
//! Skipped links and special files do not count as content.

use crate::ArchiveError;
use crate::Result;
use crate::config::PackConfig;
use crate::types::EntryKind;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

/// A filesystem node found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full filesystem path, rooted at the walked root.
    pub path: PathBuf,

    /// Whether the node is a file or an empty directory.
    pub kind: EntryKind,

    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Walks one root, yielding files and empty directories.
///
/// - A file root yields exactly one file entry.
/// - A directory whose subtree yields nothing (no children, or only
///   skipped links and special files) yields one directory entry for
///   itself.
/// - Any other directory yields no entry of its own, only its descendants.
///
/// Siblings are visited in file-name order. Symbolic links below the root
/// are skipped unless [`PackConfig::follow_symlinks`] is set; a root that
/// is itself a link is always resolved.
///
/// # Examples
///
/// ```no_run
/// use zipper_core::PackConfig;
/// use zipper_core::walker::TreeWalker;
/// use std::path::Path;
///
/// let config = PackConfig::default();
/// let walker = TreeWalker::new(Path::new("./project"), &config);
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("{} ({})", entry.path.display(), entry.kind);
/// }
/// # Ok::<(), zipper_core::ArchiveError>(())
/// ```
pub struct TreeWalker<'a> {
    root: &'a Path,
    config: &'a PackConfig,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker for the given root.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a PackConfig) -> Self {
        Self { root, config }
    }

    /// Returns a lazy iterator over the files and empty directories below
    /// the root.
    ///
    /// # Errors
    ///
    /// Items are `Io` errors when a directory cannot be listed, metadata
    /// cannot be read, or (with `follow_symlinks`) a link points back at one
    /// of its ancestors.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry>> + '_ {
        // Directories come after their contents, so by the time one is seen
        // we know whether anything below it was emitted.
        let mut populated: HashSet<PathBuf> = HashSet::new();

        WalkDir::new(self.root)
            .follow_links(self.config.follow_symlinks)
            .contents_first(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let built = build_entry(&entry, &mut populated).transpose()?;
                    if let Ok(walked) = &built {
                        mark_ancestors(&walked.path, self.root, &mut populated);
                    }
                    Some(built)
                }
                Err(e) => Some(Err(walk_error(&e))),
            })
    }
}

/// Turns a `walkdir` entry into a `WalkEntry`.
///
/// Returns `Ok(None)` for nodes that never become archive entries:
/// directories with emitted descendants, unfollowed links and special files.
fn build_entry(
    entry: &walkdir::DirEntry,
    populated: &mut HashSet<PathBuf>,
) -> Result<Option<WalkEntry>> {
    let path = entry.path();
    let file_type = entry.file_type();

    if file_type.is_symlink() {
        warn!(path = %path.display(), "skipping symbolic link");
        return Ok(None);
    }

    if file_type.is_dir() {
        if populated.remove(path) {
            return Ok(None);
        }
        return Ok(Some(WalkEntry {
            path: path.to_path_buf(),
            kind: EntryKind::Directory,
            size: 0,
        }));
    }

    if file_type.is_file() {
        let metadata = entry.metadata().map_err(|e| walk_error(&e))?;
        return Ok(Some(WalkEntry {
            path: path.to_path_buf(),
            kind: EntryKind::File,
            size: metadata.len(),
        }));
    }

    warn!(path = %path.display(), "skipping special file");
    Ok(None)
}

/// Records that every directory between `path` and `root` has content.
fn mark_ancestors(path: &Path, root: &Path, populated: &mut HashSet<PathBuf>) {
    for ancestor in path.ancestors().skip(1) {
        if !ancestor.starts_with(root) || !populated.insert(ancestor.to_path_buf()) {
            break;
        }
    }
}

fn walk_error(err: &walkdir::Error) -> ArchiveError {
    let kind = err
        .io_error()
        .map_or(std::io::ErrorKind::Other, std::io::Error::kind);
    let path = err
        .path()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    ArchiveError::Io(std::io::Error::new(
        kind,
        format!("cannot walk {path}: {err}"),
    ))
}

/// Lists the immediate children of `dir`, sorted by name.
///
/// Used to pack "everything in the working directory": each child becomes
/// one root.
///
/// # Errors
///
/// - `PathNotFound` if `dir` does not exist
/// - `Io` if it cannot be listed
pub fn working_dir_roots(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ArchiveError::PathNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut roots = fs::read_dir(dir)
        .map_err(|e| ArchiveError::io_at(dir, "read directory", &e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ArchiveError::io_at(dir, "read directory", &e))?;
    roots.sort();

    Ok(roots)
}
