//! Unpacking a ZIP archive under a destination directory.

use crate::ArchiveError;
use crate::ExtractConfig;
use crate::ExtractReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::security::resolve_entry;
use crate::types::DestDir;
use crate::types::EntryKind;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use zip::ZipArchive;

/// Extracts ZIP archives, confining every entry to the destination.
///
/// # Examples
///
/// ```no_run
/// use zipper_core::ExtractConfig;
/// use zipper_core::Extractor;
///
/// let extractor = Extractor::new(ExtractConfig::default());
/// let report = extractor.extract("out/test2.zip", "restored")?;
/// println!("{} files", report.files_extracted);
/// # Ok::<(), zipper_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with the given configuration.
    #[must_use]
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extracts `archive` into the existing directory `dest`.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract_with_progress`].
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        archive: P,
        dest: Q,
    ) -> Result<ExtractReport> {
        self.extract_with_progress(archive, dest, &mut NoopProgress)
    }

    /// Extracts `archive` into the existing directory `dest`, reporting
    /// progress.
    ///
    /// Entries are processed in stored order. Existing files are
    /// overwritten. The first failing entry stops the extraction; whatever
    /// earlier entries wrote stays on disk.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the configuration is invalid
    /// - `PathNotFound` if the archive or the destination does not exist
    /// - `InvalidArchive` if the archive or an entry header cannot be read
    /// - `SecurityViolation` if an entry would land outside `dest`
    /// - `Io` on any read or write failure
    pub fn extract_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        archive: P,
        dest: Q,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractReport> {
        let archive = archive.as_ref();
        let start = Instant::now();
        self.config.validate()?;

        if !archive.exists() {
            return Err(ArchiveError::PathNotFound {
                path: archive.to_path_buf(),
            });
        }
        let dest = DestDir::new(dest.as_ref())?;

        let file = File::open(archive).map_err(|e| ArchiveError::io_at(archive, "open", &e))?;
        let mut zip = ZipArchive::new(file)?;
        info!(
            archive = %archive.display(),
            dest = %dest.as_path().display(),
            entries = zip.len(),
            "extracting archive"
        );

        let mut report = ExtractReport::new();
        let mut buffer = vec![0u8; self.config.block_size];
        let total = zip.len();

        for idx in 0..total {
            let mut entry = zip.by_index(idx)?;
            let name = entry.name().to_string();
            progress.on_entry_start(&name, total, idx + 1);

            let target = resolve_entry(&name, &dest)?;
            debug!(entry = %name, target = %target.display(), "extracting entry");

            match EntryKind::from_entry_name(&name) {
                EntryKind::Directory => {
                    fs::create_dir_all(&target)
                        .map_err(|e| ArchiveError::io_at(&target, "create directory", &e))?;
                    report.directories_created += 1;
                }
                EntryKind::File => {
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)
                            .map_err(|e| ArchiveError::io_at(parent, "create directory", &e))?;
                    }
                    let written = write_entry(&mut entry, &name, &target, &mut buffer, progress)?;
                    report.files_extracted += 1;
                    report.bytes_written += written;
                }
            }

            progress.on_entry_complete(&name);
        }

        report.duration = start.elapsed();
        progress.on_complete();
        info!(
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "archive extracted"
        );

        Ok(report)
    }
}

fn write_entry<R: Read>(
    entry: &mut R,
    name: &str,
    target: &Path,
    buffer: &mut [u8],
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut out = File::create(target).map_err(|e| ArchiveError::io_at(target, "create", &e))?;
    let mut written = 0u64;

    loop {
        let n = entry
            .read(buffer)
            .map_err(|e| ArchiveError::io_at(Path::new(name), "read entry", &e))?;
        if n == 0 {
            break;
        }
        out.write_all(&buffer[..n])
            .map_err(|e| ArchiveError::io_at(target, "write", &e))?;
        written += n as u64;
        progress.on_bytes_written(n as u64);
    }

    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, Option<&[u8]>)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            match content {
                Some(bytes) => {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(bytes).unwrap();
                }
                None => {
                    zip.add_directory(*name, options).unwrap();
                }
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("in.zip");
        write_zip(
            &archive,
            &[
                ("dir/indir/file1.txt", Some(b"01234".as_slice())),
                ("ch/a/b/", None),
            ],
        );
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let report = Extractor::default().extract(&archive, &dest).unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.bytes_written, 5);
        assert_eq!(
            fs::read_to_string(dest.join("dir/indir/file1.txt")).unwrap(),
            "01234"
        );
        assert!(dest.join("ch/a/b").is_dir());
        assert_eq!(fs::read_dir(dest.join("ch/a/b")).unwrap().count(), 0);
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp = TempDir::new().unwrap();
        let result = Extractor::default().extract(temp.path().join("nope.zip"), temp.path());
        assert!(matches!(result, Err(ArchiveError::PathNotFound { .. })));
    }

    #[test]
    fn test_extract_missing_destination() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("in.zip");
        write_zip(&archive, &[("a.txt", Some(b"a".as_slice()))]);

        let result = Extractor::default().extract(&archive, temp.path().join("missing"));

        assert!(
            matches!(result, Err(ArchiveError::PathNotFound { ref path }) if path.ends_with("missing"))
        );
    }

    #[test]
    fn test_extract_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("fake.zip");
        fs::write(&archive, "definitely not a zip file\n".repeat(40)).unwrap();

        let result = Extractor::default().extract(&archive, temp.path());

        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }

    #[test]
    fn test_extract_stops_at_escaping_entry() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.zip");
        write_zip(
            &archive,
            &[
                ("good.txt", Some(b"good".as_slice())),
                ("../evil.txt", Some(b"evil".as_slice())),
                ("after.txt", Some(b"after".as_slice())),
            ],
        );
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let result = Extractor::default().extract(&archive, &dest);

        assert!(
            matches!(result, Err(ArchiveError::SecurityViolation { ref entry, .. }) if entry == "../evil.txt")
        );
        assert!(dest.join("good.txt").exists());
        assert!(!temp.path().join("evil.txt").exists());
        assert!(!dest.join("after.txt").exists());
    }

    #[test]
    fn test_extract_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("in.zip");
        write_zip(&archive, &[("a.txt", Some(b"new".as_slice()))]);
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "old contents that are longer").unwrap();

        Extractor::default().extract(&archive, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "new");
    }

    #[test]
    fn test_extract_small_block_size() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("in.zip");
        let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        write_zip(&archive, &[("data.bin", Some(data.as_slice()))]);

        let extractor = Extractor::new(ExtractConfig::default().with_block_size(3));
        let report = extractor.extract(&archive, temp.path()).unwrap();

        assert_eq!(report.bytes_written, 5000);
        assert_eq!(fs::read(temp.path().join("data.bin")).unwrap(), data);
    }
}
