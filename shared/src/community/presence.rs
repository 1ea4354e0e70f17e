use stronghold_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    archive::{Archive, Transfer},
    types::{DbId, PrototypeId},
};

/// One avatar entry of a presence snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarSlot {
    pub avatar_id: PrototypeId,
    pub costume_id: PrototypeId,
    pub level: u32,
    pub prestige_level: u32,
}

impl Serde for AvatarSlot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.avatar_id.ser(writer);
        self.costume_id.ser(writer);
        self.level.ser(writer);
        self.prestige_level.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            avatar_id: PrototypeId::de(reader)?,
            costume_id: PrototypeId::de(reader)?,
            level: u32::de(reader)?,
            prestige_level: u32::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.avatar_id.bit_length()
            + self.costume_id.bit_length()
            + self.level.bit_length()
            + self.prestige_level.bit_length()
    }
}

/// Latest known presence of a remote player. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub online: bool,
    pub region_id: PrototypeId,
    pub difficulty_id: PrototypeId,
    pub avatar_slots: Vec<AvatarSlot>,
}

impl Transfer for PresenceSnapshot {
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let mut success = true;
        success &= archive.transfer("online", &mut self.online);
        success &= archive.transfer("region_id", &mut self.region_id);
        success &= archive.transfer("difficulty_id", &mut self.difficulty_id);

        let mut num_slots = self.avatar_slots.len() as u32;
        success &= archive.transfer_count("num_avatar_slots", &mut num_slots);
        if archive.is_decoding() {
            self.avatar_slots = vec![AvatarSlot::default(); num_slots as usize];
        }
        for slot in self.avatar_slots.iter_mut() {
            success &= archive.transfer("avatar_id", &mut slot.avatar_id);
            success &= archive.transfer("costume_id", &mut slot.costume_id);
            success &= archive.transfer("level", &mut slot.level);
            success &= archive.transfer("prestige_level", &mut slot.prestige_level);
        }
        success
    }
}

impl Serde for PresenceSnapshot {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.online.ser(writer);
        self.region_id.ser(writer);
        self.difficulty_id.ser(writer);
        self.avatar_slots.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            online: bool::de(reader)?,
            region_id: PrototypeId::de(reader)?,
            difficulty_id: PrototypeId::de(reader)?,
            avatar_slots: Vec::<AvatarSlot>::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.online.bit_length()
            + self.region_id.bit_length()
            + self.difficulty_id.bit_length()
            + self.avatar_slots.bit_length()
    }
}

/// Inbound presence update for one remote member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityBroadcast {
    pub member_db_id: DbId,
    pub snapshot: PresenceSnapshot,
}

impl Serde for CommunityBroadcast {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.member_db_id.ser(writer);
        self.snapshot.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            member_db_id: DbId::de(reader)?,
            snapshot: PresenceSnapshot::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.member_db_id.bit_length() + self.snapshot.bit_length()
    }
}
