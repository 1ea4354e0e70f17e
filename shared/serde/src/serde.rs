use crate::{BitReader, BitWrite, SerdeErr};

/// A type that can be written to and read back from a bit stream
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes self into the outgoing stream
    fn ser(&self, writer: &mut dyn BitWrite);

    /// Reads a value of this type out of the incoming stream
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    /// Number of bits `ser` would write for this value
    fn bit_length(&self) -> u32;
}

/// Types whose encoding always takes the same number of bits
pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
