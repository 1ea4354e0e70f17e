use stronghold_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            pub const INVALID: Self = Self(0);

            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }

            pub fn is_valid(&self) -> bool {
                self.0 != 0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:#x})", stringify!($name), self.0)
            }
        }

        impl Serde for $name {
            fn ser(&self, writer: &mut dyn BitWrite) {
                self.0.ser(writer);
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                Ok(Self(u64::de(reader)?))
            }

            fn bit_length(&self) -> u32 {
                <u64 as ConstBitLength>::const_bit_length()
            }
        }
    };
}

id_type!(
    /// Database id of a player account. Zero never names a real account.
    DbId
);
id_type!(
    /// Reference to a prototype (region, difficulty, avatar, costume, stash inventory)
    PrototypeId
);
id_type!(
    /// Reference to a client-side asset such as a stash tab icon
    AssetId
);

/// Channel id a [`ReplicatedScalar`](crate::ReplicatedScalar) is replicated on
pub type ReplicationId = u64;
