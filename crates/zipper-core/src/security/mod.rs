//! Zip-slip protection for extraction.
//!
//! Every stored entry name is resolved against the destination directory
//! before anything is written. A name that would land outside the
//! destination aborts the extraction with
//! [`ArchiveError::SecurityViolation`](crate::ArchiveError::SecurityViolation).

pub mod path;

pub use path::resolve_entry;
