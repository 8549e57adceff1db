//! Operation reports and progress callbacks.

use std::time::Duration;

/// Report of a pack operation.
///
/// The byte counts are diagnostic only; nothing in the packer depends on
/// them.
///
/// # Examples
///
/// ```
/// use zipper_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_read = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.total_entries(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of file entries written.
    pub files_added: usize,

    /// Number of (empty) directory entries written.
    pub directories_added: usize,

    /// Entries left out: the archive itself, or names shadowed by a later
    /// entry with the same name.
    pub entries_skipped: usize,

    /// Total bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive file in bytes.
    pub archive_size: u64,

    /// Duration of the operation.
    pub duration: Duration,

    /// Warnings generated while packing.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of entries written to the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }

    /// Returns `bytes_read / archive_size`, or 0.0 if either is zero.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}

/// Report of an extract operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the operation.
    pub duration: Duration,
}

impl ExtractReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Callback trait for progress reporting during pack and extract.
///
/// # Examples
///
/// ```
/// use zipper_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {name}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before an entry is processed.
    ///
    /// * `name` - Archive name of the entry
    /// * `total` - Total number of entries
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called after each block of bytes is copied.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been processed.
    fn on_entry_complete(&mut self, name: &str);

    /// Called once when the whole operation has finished successfully.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pack_report() {
        let report = PackReport::new();
        assert_eq!(report.total_entries(), 0);
        assert_eq!(report.bytes_read, 0);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_pack_report_warnings() {
        let mut report = PackReport::new();
        report.add_warning("skipped test.zip");
        assert!(report.has_warnings());
        assert_eq!(report.warnings, vec!["skipped test.zip".to_string()]);
    }

    #[test]
    fn test_compression_ratio_edge_cases() {
        let mut report = PackReport::new();
        assert!((report.compression_ratio() - 0.0).abs() < f64::EPSILON);

        report.bytes_read = 1000;
        report.archive_size = 1000;
        assert!((report.compression_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_report_total_items() {
        let report = ExtractReport {
            files_extracted: 3,
            directories_created: 1,
            ..Default::default()
        };
        assert_eq!(report.total_items(), 4);
    }

    #[test]
    fn test_noop_progress() {
        let mut progress = NoopProgress;
        progress.on_entry_start("a.txt", 1, 1);
        progress.on_bytes_written(10);
        progress.on_entry_complete("a.txt");
        progress.on_complete();
    }
}
