//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use zipper_core::ExtractReport;
use zipper_core::PackReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of packing into `archive`
    fn format_pack_result(&self, archive: &Path, report: &PackReport) -> Result<()>;

    /// Format the result of unpacking `archive` into `dest`
    fn format_unpack_result(&self, archive: &Path, dest: &Path, report: &ExtractReport)
    -> Result<()>;

    /// Format an error that ended `operation`
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let output = JsonOutput::success("pack", 3);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["operation"], "pack");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], 3);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_shape() {
        let output = JsonOutput::error("unpack", "boom");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "boom");
        assert!(value.get("data").is_none());
    }
}
