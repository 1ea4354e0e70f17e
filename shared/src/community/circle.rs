use std::{collections::BTreeSet, fmt};

use stronghold_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::{
    archive::{ArchivePurpose, ReplicationPolicy},
    types::DbId,
};

/// Identifies a community circle. System circles have fixed, reserved ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CircleId {
    Friends = 1,
    Ignore = 2,
    Nearby = 3,
    Party = 4,
    Guild = 5,
}

impl CircleId {
    pub const SYSTEM: [CircleId; 5] = [
        CircleId::Friends,
        CircleId::Ignore,
        CircleId::Nearby,
        CircleId::Party,
        CircleId::Guild,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::SYSTEM.into_iter().find(|id| *id as u8 == value)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CircleId::Friends => "Friends",
            CircleId::Ignore => "Ignore",
            CircleId::Nearby => "Nearby",
            CircleId::Party => "Party",
            CircleId::Guild => "Guild",
        }
    }

    /// Friends and Ignore lists survive logout. Nearby, Party and Guild are
    /// rebuilt from live state every session.
    pub fn is_persistent(&self) -> bool {
        matches!(self, CircleId::Friends | CircleId::Ignore)
    }

    pub fn should_archive_to(&self, purpose: ArchivePurpose) -> bool {
        match purpose {
            ArchivePurpose::Persistence => self.is_persistent(),
            ArchivePurpose::Replication(policy) => policy == ReplicationPolicy::Owner,
            ArchivePurpose::Migration => true,
        }
    }

    /// Bit used for this circle in a membership mask
    pub fn bit(&self) -> u64 {
        1 << (*self as u8)
    }
}

impl fmt::Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serde for CircleId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (*self as u8).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = u8::de(reader)?;
        Self::from_u8(value).ok_or(SerdeErr::UnknownVariant {
            value: value as u64,
            type_name: "CircleId",
        })
    }

    fn bit_length(&self) -> u32 {
        <u8 as ConstBitLength>::const_bit_length()
    }
}

/// A named membership group. Holds the ids of its members; the matching
/// entries in each member's own circle set are kept in step by
/// [`Community`](crate::Community).
#[derive(Debug, Clone)]
pub struct CommunityCircle {
    id: CircleId,
    members: BTreeSet<DbId>,
}

impl CommunityCircle {
    pub fn new(id: CircleId) -> Self {
        Self {
            id,
            members: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> CircleId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn contains(&self, db_id: DbId) -> bool {
        self.members.contains(&db_id)
    }

    pub fn members(&self) -> impl Iterator<Item = DbId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn insert(&mut self, db_id: DbId) -> bool {
        self.members.insert(db_id)
    }

    pub(crate) fn remove(&mut self, db_id: DbId) -> bool {
        self.members.remove(&db_id)
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}
