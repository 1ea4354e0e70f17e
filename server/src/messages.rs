use stronghold_shared::{
    BitReader, BitWrite, CommunityBroadcast, ConstBitLength, PrototypeId, Serde, SerdeErr,
    StashTabOptionsUpdate,
};

/// Client request to move (or create) a stash tab at `position`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashTabInsertRequest {
    pub tab_id: PrototypeId,
    pub position: i32,
}

impl Serde for StashTabInsertRequest {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.tab_id.ser(writer);
        self.position.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            tab_id: PrototypeId::de(reader)?,
            position: i32::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.tab_id.bit_length() + self.position.bit_length()
    }
}

/// Presence updates relayed from the social service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityBroadcastBatch {
    pub broadcasts: Vec<CommunityBroadcast>,
}

impl Serde for CommunityBroadcastBatch {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.broadcasts.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            broadcasts: Vec::<CommunityBroadcast>::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.broadcasts.bit_length()
    }
}

/// Every message a Player accepts, tagged by a leading byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    StashTabInsert(StashTabInsertRequest),
    StashTabOptions(StashTabOptionsUpdate),
    CommunityBroadcasts(CommunityBroadcastBatch),
}

impl InboundMessage {
    const STASH_TAB_INSERT: u8 = 1;
    const STASH_TAB_OPTIONS: u8 = 2;
    const COMMUNITY_BROADCASTS: u8 = 3;

    fn tag(&self) -> u8 {
        match self {
            InboundMessage::StashTabInsert(_) => Self::STASH_TAB_INSERT,
            InboundMessage::StashTabOptions(_) => Self::STASH_TAB_OPTIONS,
            InboundMessage::CommunityBroadcasts(_) => Self::COMMUNITY_BROADCASTS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InboundMessage::StashTabInsert(_) => "StashTabInsert",
            InboundMessage::StashTabOptions(_) => "StashTabOptions",
            InboundMessage::CommunityBroadcasts(_) => "CommunityBroadcasts",
        }
    }

    /// Reads one message from the front of `bytes`
    pub fn read(bytes: &[u8]) -> Result<Self, SerdeErr> {
        let mut reader = BitReader::new(bytes);
        Self::de(&mut reader)
    }
}

impl Serde for InboundMessage {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.tag().ser(writer);
        match self {
            InboundMessage::StashTabInsert(request) => request.ser(writer),
            InboundMessage::StashTabOptions(update) => update.ser(writer),
            InboundMessage::CommunityBroadcasts(batch) => batch.ser(writer),
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let tag = u8::de(reader)?;
        match tag {
            Self::STASH_TAB_INSERT => Ok(Self::StashTabInsert(StashTabInsertRequest::de(reader)?)),
            Self::STASH_TAB_OPTIONS => Ok(Self::StashTabOptions(StashTabOptionsUpdate::de(reader)?)),
            Self::COMMUNITY_BROADCASTS => {
                Ok(Self::CommunityBroadcasts(CommunityBroadcastBatch::de(reader)?))
            }
            _ => Err(SerdeErr::UnknownVariant {
                value: tag as u64,
                type_name: "InboundMessage",
            }),
        }
    }

    fn bit_length(&self) -> u32 {
        let body = match self {
            InboundMessage::StashTabInsert(request) => request.bit_length(),
            InboundMessage::StashTabOptions(update) => update.bit_length(),
            InboundMessage::CommunityBroadcasts(batch) => batch.bit_length(),
        };
        <u8 as ConstBitLength>::const_bit_length() + body
    }
}
