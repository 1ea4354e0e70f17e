mod archive;
mod archive_config;
mod error;
mod purpose;

pub use archive::{decode_into, encode_to_vec, Archive, ArchiveMode, Transfer};
pub use archive_config::ArchiveConfig;
pub use error::ArchiveError;
pub use purpose::{ArchivePurpose, ReplicationPolicy};
