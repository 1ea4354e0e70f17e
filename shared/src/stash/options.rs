use stronghold_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::types::{AssetId, PrototypeId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StashTabColor {
    #[default]
    White = 0,
    Red = 1,
    Orange = 2,
    Yellow = 3,
    Green = 4,
    Blue = 5,
    Purple = 6,
}

impl StashTabColor {
    const ALL: [StashTabColor; 7] = [
        StashTabColor::White,
        StashTabColor::Red,
        StashTabColor::Orange,
        StashTabColor::Yellow,
        StashTabColor::Green,
        StashTabColor::Blue,
        StashTabColor::Purple,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|color| *color as u8 == value)
    }
}

impl Serde for StashTabColor {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (*self as u8).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = u8::de(reader)?;
        Self::from_u8(value).ok_or(SerdeErr::UnknownVariant {
            value: value as u64,
            type_name: "StashTabColor",
        })
    }

    fn bit_length(&self) -> u32 {
        <u8 as ConstBitLength>::const_bit_length()
    }
}

/// User-facing presentation of one stash tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StashTabOptions {
    pub display_name: String,
    pub icon_asset_id: AssetId,
    pub color: StashTabColor,
    pub sort_order: u32,
}

/// Inbound request to change the presentation of a tab. Only fields that are
/// `Some` overwrite the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StashTabOptionsUpdate {
    pub tab_id: PrototypeId,
    pub display_name: Option<String>,
    pub icon_asset_id: Option<AssetId>,
    pub color: Option<StashTabColor>,
}

impl Serde for StashTabOptionsUpdate {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.tab_id.ser(writer);
        self.display_name.ser(writer);
        self.icon_asset_id.ser(writer);
        self.color.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            tab_id: PrototypeId::de(reader)?,
            display_name: Option::<String>::de(reader)?,
            icon_asset_id: Option::<AssetId>::de(reader)?,
            color: Option::<StashTabColor>::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        self.tab_id.bit_length()
            + self.display_name.bit_length()
            + self.icon_asset_id.bit_length()
            + self.color.bit_length()
    }
}

pub(crate) fn truncate_display_name(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}
