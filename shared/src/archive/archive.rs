use std::fmt;

use log::warn;

use stronghold_serde::{BitReader, BitWriter, Serde, UnsignedVariableInteger};

use super::{ArchiveConfig, ArchiveError, ArchivePurpose};

/// Direction an archive moves data in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveMode {
    Encode,
    Decode,
}

impl fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveMode::Encode => write!(f, "encode"),
            ArchiveMode::Decode => write!(f, "decode"),
        }
    }
}

/// A structure whose fields are transferred through an [`Archive`].
///
/// Implementations list their fields in a fixed order and call the archive
/// once per field. The same function runs for encode and decode, so the
/// order cannot drift between the two directions.
pub trait Transfer {
    /// Returns false if any field failed. Implementations keep transferring
    /// the remaining fields after a failure so the stream stays aligned.
    fn transfer(&mut self, archive: &mut Archive) -> bool;
}

enum ArchiveStream<'b> {
    Encoder(BitWriter),
    Decoder(BitReader<'b>),
}

/// Ordered, bidirectional pipe between a value and a bit stream.
///
/// Field failures are latched: the failing field is logged and recorded,
/// the call returns false and the walk continues. [`Archive::finish_encode`]
/// and [`Archive::finish_decode`] report the overall outcome.
pub struct Archive<'b> {
    stream: ArchiveStream<'b>,
    purpose: ArchivePurpose,
    config: ArchiveConfig,
    failures: Vec<ArchiveError>,
}

impl Archive<'static> {
    pub fn encoder(purpose: ArchivePurpose) -> Self {
        Self {
            stream: ArchiveStream::Encoder(BitWriter::new()),
            purpose,
            config: ArchiveConfig::default(),
            failures: Vec::new(),
        }
    }
}

impl<'b> Archive<'b> {
    pub fn decoder(bytes: &'b [u8], purpose: ArchivePurpose) -> Self {
        Self {
            stream: ArchiveStream::Decoder(BitReader::new(bytes)),
            purpose,
            config: ArchiveConfig::default(),
            failures: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ArchiveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(&self) -> ArchiveMode {
        match self.stream {
            ArchiveStream::Encoder(_) => ArchiveMode::Encode,
            ArchiveStream::Decoder(_) => ArchiveMode::Decode,
        }
    }

    pub fn is_encoding(&self) -> bool {
        self.mode() == ArchiveMode::Encode
    }

    pub fn is_decoding(&self) -> bool {
        self.mode() == ArchiveMode::Decode
    }

    pub fn purpose(&self) -> ArchivePurpose {
        self.purpose
    }

    pub fn is_persistent(&self) -> bool {
        self.purpose.is_persistent()
    }

    pub fn is_replication(&self) -> bool {
        self.purpose.is_replication()
    }

    pub fn is_migration(&self) -> bool {
        self.purpose.is_migration()
    }

    /// True if no field has failed so far
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ArchiveError] {
        &self.failures
    }

    // Field transfers

    /// Transfers a single field. On decode the field is only overwritten if
    /// the read succeeds.
    pub fn transfer<T: Serde>(&mut self, field: &'static str, value: &mut T) -> bool {
        let result = match &mut self.stream {
            ArchiveStream::Encoder(writer) => {
                value.ser(writer);
                return true;
            }
            ArchiveStream::Decoder(reader) => T::de(reader),
        };

        match result {
            Ok(read_value) => {
                *value = read_value;
                true
            }
            Err(source) => self.record_failure(ArchiveError::FieldTransferFailed {
                field,
                mode: ArchiveMode::Decode,
                source,
            }),
        }
    }

    /// Transfers a nested structure in place, in its own field order
    pub fn transfer_nested<T: Transfer>(&mut self, value: &mut T) -> bool {
        value.transfer(self)
    }

    /// Transfers a u64 as a variable-length integer
    pub fn transfer_varint(&mut self, field: &'static str, value: &mut u64) -> bool {
        let mut encoded = UnsignedVariableInteger::<7>::new(*value);
        if !self.transfer(field, &mut encoded) {
            return false;
        }

        match encoded.to::<u64>() {
            Ok(decoded) => {
                *value = decoded;
                true
            }
            Err(source) => self.record_failure(ArchiveError::FieldTransferFailed {
                field,
                mode: self.mode(),
                source,
            }),
        }
    }

    /// Transfers the inline boolean guarding an optional block. The writer
    /// passes its decision in `include`, the reader receives it there.
    pub fn transfer_flag(&mut self, field: &'static str, include: &mut bool) -> bool {
        self.transfer(field, include)
    }

    /// Transfers the count prefix of a collection. A decoded count larger
    /// than the configured limit, or than the bits left in the stream, is a
    /// failure and `count` is set to zero so the caller reads nothing.
    pub fn transfer_count(&mut self, field: &'static str, count: &mut u32) -> bool {
        let mut wide = *count as u64;
        if !self.transfer_varint(field, &mut wide) {
            *count = 0;
            return false;
        }

        if let ArchiveStream::Decoder(reader) = &self.stream {
            let limit = (self.config.max_collection_len as u64).min(reader.bits_remaining() as u64);
            if wide > limit {
                *count = 0;
                return self.record_failure(ArchiveError::CollectionTooLarge {
                    field,
                    count: wide,
                    limit,
                });
            }
        }

        *count = wide as u32;
        true
    }

    /// Latches a failure detected by a [`Transfer`] implementation itself,
    /// e.g. a decoded value the owning structure refused. Always returns false.
    pub fn record_failure(&mut self, error: ArchiveError) -> bool {
        warn!(
            "Archive ({:?}) failed to {} a field: {}",
            self.purpose,
            self.mode(),
            error
        );
        self.failures.push(error);
        false
    }

    fn summary(&self) -> Result<(), ArchiveError> {
        if self.failures.is_empty() {
            return Ok(());
        }

        let failed_fields = self
            .failures
            .iter()
            .map(|failure| match failure {
                ArchiveError::FieldTransferFailed { field, .. }
                | ArchiveError::CollectionTooLarge { field, .. }
                | ArchiveError::FieldRejected { field, .. } => *field,
                ArchiveError::Incomplete { .. } => "<nested>",
            })
            .collect();

        Err(ArchiveError::Incomplete {
            mode: self.mode(),
            failed_fields,
        })
    }

    /// Ends an encode walk, returning the written bytes if every field succeeded
    pub fn finish_encode(self) -> Result<Vec<u8>, ArchiveError> {
        self.summary()?;
        match self.stream {
            ArchiveStream::Encoder(writer) => Ok(writer.to_bytes()),
            ArchiveStream::Decoder(_) => Err(ArchiveError::Incomplete {
                mode: ArchiveMode::Decode,
                failed_fields: vec!["<finish_encode called on a decoder>"],
            }),
        }
    }

    /// Ends a decode walk
    pub fn finish_decode(self) -> Result<(), ArchiveError> {
        self.summary()
    }
}

/// Encodes `value` for the given destination channel
pub fn encode_to_vec<T: Transfer>(
    value: &mut T,
    purpose: ArchivePurpose,
) -> Result<Vec<u8>, ArchiveError> {
    let mut archive = Archive::encoder(purpose);
    value.transfer(&mut archive);
    archive.finish_encode()
}

/// Decodes `bytes` into `value`. All fields are walked even if an early one
/// fails; the first failures are reported in the returned error.
pub fn decode_into<T: Transfer>(
    bytes: &[u8],
    value: &mut T,
    purpose: ArchivePurpose,
) -> Result<(), ArchiveError> {
    let mut archive = Archive::decoder(bytes, purpose);
    value.transfer(&mut archive);
    archive.finish_decode()
}
