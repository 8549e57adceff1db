//! ZIP packing and unpacking with zip-slip protection.
//!
//! `zipper-core` packs files and directory trees into a ZIP archive,
//! keeping their relative structure and empty directories, and extracts
//! archives back onto disk while confining every entry to the destination
//! directory.
//!
//! # Examples
//!
//! ```no_run
//! use zipper_core::ExtractConfig;
//! use zipper_core::PackConfig;
//! use zipper_core::extract_archive;
//! use zipper_core::pack_paths;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = pack_paths(&["dir", "pic1.png"], "out/test1.zip", &PackConfig::default())?;
//! println!("Packed {} entries", report.total_entries());
//!
//! let report = extract_archive("out/test1.zip", "restored", &ExtractConfig::default())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod names;
pub mod pack;
pub mod report;
pub mod security;
pub mod types;
pub mod walker;

// Re-export main API types
pub use api::extract_archive;
pub use api::pack_paths;
pub use config::ExtractConfig;
pub use config::PackConfig;
pub use config::Sources;
pub use error::ArchiveError;
pub use error::Result;
pub use extract::Extractor;
pub use names::archive_file_name;
pub use names::validate_archive_name;
pub use pack::PackEntry;
pub use pack::Packer;
pub use report::ExtractReport;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;

pub use types::DestDir;
pub use types::EntryKind;
