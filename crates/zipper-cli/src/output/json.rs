//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use zipper_core::ExtractReport;
use zipper_core::PackReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackOutput {
    archive: String,
    files_added: usize,
    directories_added: usize,
    entries_skipped: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl PackOutput {
    fn new(archive: &Path, report: &PackReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            entries_skipped: report.entries_skipped,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct UnpackOutput {
    archive: String,
    destination: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, archive: &Path, report: &PackReport) -> Result<()> {
        let output = JsonOutput::success("pack", PackOutput::new(archive, report));
        Self::output(&output)
    }

    fn format_unpack_result(
        &self,
        archive: &Path,
        dest: &Path,
        report: &ExtractReport,
    ) -> Result<()> {
        let data = UnpackOutput {
            archive: archive.display().to_string(),
            destination: dest.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        let output = JsonOutput::success("unpack", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_output_fields() {
        let report = PackReport {
            files_added: 3,
            directories_added: 1,
            bytes_read: 115,
            archive_size: 500,
            ..Default::default()
        };

        let data = PackOutput::new(Path::new("out/test2.zip"), &report);
        let value = serde_json::to_value(JsonOutput::success("pack", data)).unwrap();

        assert_eq!(value["operation"], "pack");
        assert_eq!(value["data"]["files_added"], 3);
        assert_eq!(value["data"]["directories_added"], 1);
        assert_eq!(value["data"]["archive"], "out/test2.zip");
    }
}
