//! Small value types shared by the packer and the extractor.

pub mod dest_dir;
pub mod entry_kind;

pub use dest_dir::DestDir;
pub use entry_kind::EntryKind;
