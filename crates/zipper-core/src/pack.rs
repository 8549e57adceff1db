//! Packing filesystem roots into a ZIP archive.

use crate::ArchiveError;
use crate::NoopProgress;
use crate::PackConfig;
use crate::PackReport;
use crate::ProgressCallback;
use crate::Result;
use crate::names::absolute_root;
use crate::names::entry_name;
use crate::types::EntryKind;
use crate::walker::TreeWalker;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One entry planned for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Archive-relative name, `/`-separated. Directories end with `/`.
    pub name: String,

    /// Absolute path of the filesystem node the entry is read from.
    pub source: PathBuf,

    /// File or (empty) directory.
    pub kind: EntryKind,

    /// Size in bytes when walked (0 for directories).
    pub size: u64,
}

/// Packs ordered roots into a ZIP archive.
///
/// # Examples
///
/// ```no_run
/// use zipper_core::PackConfig;
/// use zipper_core::Packer;
///
/// let packer = Packer::new(PackConfig::default());
/// let report = packer.pack(&["dir", "pic1.png"], "out/test1.zip")?;
/// println!("{} entries", report.total_entries());
/// # Ok::<(), zipper_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Packer {
    config: PackConfig,
}

impl Packer {
    /// Creates a packer with the given configuration.
    #[must_use]
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// Packs `roots` into the archive at `output`.
    ///
    /// # Errors
    ///
    /// See [`Packer::pack_with_progress`].
    pub fn pack<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        roots: &[P],
        output: Q,
    ) -> Result<PackReport> {
        self.pack_with_progress(roots, output, &mut NoopProgress)
    }

    /// Packs `roots` into the archive at `output`, reporting progress.
    ///
    /// Every root is checked before the output file is created. An existing
    /// file at `output` is truncated. On failure the partially written
    /// archive is left in place.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `roots` is empty (unless
    ///   [`PackConfig::allow_empty`] is set) or the configuration is invalid
    /// - `PathNotFound` if a root does not exist
    /// - `InvalidName` / `InvalidPath` if an entry name cannot be computed
    /// - `Io` if a root cannot be walked, a file cannot be read, or the
    ///   archive cannot be written
    pub fn pack_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        roots: &[P],
        output: Q,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PackReport> {
        let output = output.as_ref();
        let start = Instant::now();
        let mut report = PackReport::new();

        let entries = self.plan(roots, output, &mut report)?;
        info!(
            archive = %output.display(),
            entries = entries.len(),
            bytes = entries.iter().map(|e| e.size).sum::<u64>(),
            "packing archive"
        );

        let file = File::create(output).map_err(|e| ArchiveError::io_at(output, "create", &e))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut buffer = vec![0u8; self.config.block_size];

        let total = entries.len();
        for (idx, entry) in entries.iter().enumerate() {
            progress.on_entry_start(&entry.name, total, idx + 1);
            debug!(entry = %entry.name, source = %entry.source.display(), "adding entry");

            match entry.kind {
                EntryKind::Directory => {
                    zip.add_directory(entry.name.as_str(), options)?;
                    report.directories_added += 1;
                }
                EntryKind::File => {
                    zip.start_file(entry.name.as_str(), options)?;
                    let copied = copy_source(&entry.source, &mut zip, output, &mut buffer, progress)?;
                    report.files_added += 1;
                    report.bytes_read += copied;
                }
            }

            progress.on_entry_complete(&entry.name);
        }

        let file = zip.finish()?;
        report.archive_size = file
            .metadata()
            .map_err(|e| ArchiveError::io_at(output, "read metadata of", &e))?
            .len();
        report.duration = start.elapsed();

        progress.on_complete();
        info!(
            archive = %output.display(),
            files = report.files_added,
            directories = report.directories_added,
            size = report.archive_size,
            "archive written"
        );

        Ok(report)
    }

    /// Builds the ordered entry list for `roots` without writing anything.
    ///
    /// Entries appear in root order, then walk order within each root. The
    /// archive itself is left out, and when two entries share a name only
    /// the later one is kept. Both kinds of skip are counted in `report`.
    ///
    /// # Errors
    ///
    /// Same as [`Packer::pack_with_progress`], minus the archive writes.
    pub fn plan<P: AsRef<Path>>(
        &self,
        roots: &[P],
        output: &Path,
        report: &mut PackReport,
    ) -> Result<Vec<PackEntry>> {
        self.config.validate()?;

        if roots.is_empty() && !self.config.allow_empty {
            return Err(ArchiveError::InvalidArgument(
                "no paths given to pack".to_string(),
            ));
        }

        for root in roots {
            let root = root.as_ref();
            if !root.exists() {
                return Err(ArchiveError::PathNotFound {
                    path: root.to_path_buf(),
                });
            }
        }

        let archive = OutputFile::new(output)?;
        let mut entries = Vec::new();

        for root in roots {
            let root = absolute_root(root.as_ref())?;
            for walked in TreeWalker::new(&root, &self.config).walk() {
                let walked = walked?;
                let name = entry_name(&root, &walked.path, walked.kind)?;

                if archive.is_self(&name, &walked.path) {
                    warn!(entry = %name, "skipping the archive being written");
                    report.entries_skipped += 1;
                    report.add_warning(format!("Skipped the archive itself: {name}"));
                    continue;
                }

                entries.push(PackEntry {
                    name,
                    source: walked.path,
                    kind: walked.kind,
                    size: walked.size,
                });
            }
        }

        Ok(drop_shadowed(entries, report))
    }
}

/// Keeps only the last entry for every name, in its original position.
fn drop_shadowed(entries: Vec<PackEntry>, report: &mut PackReport) -> Vec<PackEntry> {
    let keep: Vec<bool> = {
        let last_index: HashMap<&str, usize> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.name.as_str(), idx))
            .collect();

        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| last_index.get(entry.name.as_str()) == Some(&idx))
            .collect()
    };

    entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, keep)| {
            if keep {
                return Some(entry);
            }
            warn!(
                entry = %entry.name,
                source = %entry.source.display(),
                "entry shadowed by a later one with the same name"
            );
            report.entries_skipped += 1;
            report.add_warning(format!(
                "Replaced duplicate entry: {} ({})",
                entry.name,
                entry.source.display()
            ));
            None
        })
        .collect()
}

/// The archive being written, as seen from the walked trees.
struct OutputFile {
    name: String,
    absolute: PathBuf,
    canonical: Option<PathBuf>,
}

impl OutputFile {
    fn new(output: &Path) -> Result<Self> {
        let name = output
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ArchiveError::InvalidArgument(format!(
                    "output path has no usable file name: {}",
                    output.display()
                ))
            })?
            .to_string();
        let absolute =
            std::path::absolute(output).map_err(|e| ArchiveError::io_at(output, "resolve", &e))?;
        let canonical = output.canonicalize().ok();

        Ok(Self {
            name,
            absolute,
            canonical,
        })
    }

    fn is_self(&self, name: &str, source: &Path) -> bool {
        if name == self.name || source == self.absolute {
            return true;
        }

        // Only an archive that already exists can show up in a walk.
        match &self.canonical {
            Some(canonical) if source.file_name() == canonical.file_name() => source
                .canonicalize()
                .is_ok_and(|resolved| &resolved == canonical),
            _ => false,
        }
    }
}

fn copy_source<W: Write + Seek>(
    source: &Path,
    zip: &mut ZipWriter<W>,
    output: &Path,
    buffer: &mut [u8],
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut file = File::open(source).map_err(|e| ArchiveError::io_at(source, "open", &e))?;
    let mut copied = 0u64;

    loop {
        let n = file
            .read(buffer)
            .map_err(|e| ArchiveError::io_at(source, "read", &e))?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])
            .map_err(|e| ArchiveError::io_at(output, "write", &e))?;
        copied += n as u64;
        progress.on_bytes_written(n as u64);
    }

    Ok(copied)
}
