use thiserror::Error;

use stronghold_serde::SerdeErr;

use super::ArchiveMode;

/// Errors latched by an [`Archive`](super::Archive) while walking a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// A single field could not be read from the stream
    #[error("Failed to {mode} field `{field}`: {source}")]
    FieldTransferFailed {
        field: &'static str,
        mode: ArchiveMode,
        #[source]
        source: SerdeErr,
    },

    /// A decoded count prefix exceeds what the archive is willing to read
    #[error("Collection `{field}` has {count} elements, limit is {limit}")]
    CollectionTooLarge {
        field: &'static str,
        count: u64,
        limit: u64,
    },

    /// A field was transferred but the owning structure refused the value
    #[error("Field `{field}` was rejected: {reason}")]
    FieldRejected { field: &'static str, reason: String },

    /// Summary returned once the walk is complete and at least one field failed
    #[error("Archive {mode} incomplete, {} field(s) failed: {failed_fields:?}", failed_fields.len())]
    Incomplete {
        mode: ArchiveMode,
        failed_fields: Vec<&'static str>,
    },
}
