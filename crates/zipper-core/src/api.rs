//! High-level public API for packing and unpacking archives.

use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractReport;
use crate::Extractor;
use crate::PackConfig;
use crate::PackReport;
use crate::Packer;
use crate::Result;

/// Packs files and directory trees into a ZIP archive.
///
/// Roots are packed in the given order. Each entry is named after its
/// root's own name followed by its path below the root, so packing `dir`
/// yields entries such as `dir/indir/file1.txt`. Empty directories become
/// directory entries; non-empty ones are implied by their contents.
///
/// # Arguments
///
/// * `roots` - Files and directories to pack
/// * `output` - Path of the archive to create (its directory must exist)
/// * `config` - Pack configuration
///
/// # Errors
///
/// Returns an error if:
/// - `roots` is empty or the configuration is invalid
/// - A root does not exist (the archive is not created)
/// - A root cannot be walked or a file cannot be read
/// - The archive cannot be written
///
/// # Examples
///
/// ```no_run
/// use zipper_core::PackConfig;
/// use zipper_core::pack_paths;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = pack_paths(&["dir", "ch"], "out/test2.zip", &PackConfig::default())?;
/// println!("Packed {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn pack_paths<P: AsRef<Path>, Q: AsRef<Path>>(
    roots: &[P],
    output: Q,
    config: &PackConfig,
) -> Result<PackReport> {
    Packer::new(config.clone()).pack(roots, output)
}

/// Extracts a ZIP archive into an existing directory.
///
/// Every entry is checked against the destination before it is written;
/// the first entry that would escape it stops the extraction with
/// [`ArchiveError::SecurityViolation`](crate::ArchiveError::SecurityViolation).
///
/// # Arguments
///
/// * `archive` - Path to the archive file
/// * `dest` - Directory where entries are written
/// * `config` - Extract configuration
///
/// # Errors
///
/// Returns an error if:
/// - The archive or the destination does not exist
/// - The archive cannot be read
/// - An entry escapes the destination
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use zipper_core::ExtractConfig;
/// use zipper_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("out/test2.zip", "restored", &ExtractConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    dest: Q,
    config: &ExtractConfig,
) -> Result<ExtractReport> {
    Extractor::new(config.clone()).extract(archive, dest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pack_then_extract() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("dir");
        fs::create_dir_all(root.join("indir")).unwrap();
        fs::write(root.join("indir/file1.txt"), "01234").unwrap();
        let archive = temp.path().join("test.zip");
        let dest = temp.path().join("restored");
        fs::create_dir(&dest).unwrap();

        let packed = pack_paths(&[&root], &archive, &PackConfig::default()).unwrap();
        let extracted = extract_archive(&archive, &dest, &ExtractConfig::default()).unwrap();

        assert_eq!(packed.files_added, 1);
        assert_eq!(extracted.files_extracted, 1);
        assert_eq!(
            fs::read_to_string(dest.join("dir/indir/file1.txt")).unwrap(),
            "01234"
        );
    }
}
