use thiserror::Error;

/// Errors that can occur while reading values out of a bit stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of its buffer
    #[error("Attempted to read past the end of the stream (needed {needed} more bits)")]
    EndOfStream { needed: u32 },

    /// A string payload was not valid UTF-8
    #[error("String payload of {length} bytes is not valid UTF-8")]
    InvalidUtf8 { length: usize },

    /// A decoded value does not fit the type it was read into
    #[error("Value {value} is out of range for {type_name}")]
    ValueOutOfRange { value: i128, type_name: &'static str },

    /// A decoded discriminant does not name any known variant
    #[error("Unknown {type_name} discriminant {value}")]
    UnknownVariant { value: u64, type_name: &'static str },
}
