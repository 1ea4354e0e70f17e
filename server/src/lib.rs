//! # Stronghold Server
//! Server-side owner of one player's replicated state. A [`Player`] composes
//! the community cache, the stash tab ordering and the replicated scalars of
//! `stronghold-shared`, validates inbound requests against the inventory
//! system, and encodes the whole for storage, live sync or migration.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use stronghold_shared::{
        ArchivePurpose, CircleId, CommunityBroadcast, DbId, PresenceSnapshot, PrototypeId,
        ReplicationPolicy, StashTabColor, StashTabOptionsUpdate,
    };
}

mod error;
mod events;
mod inventory;
mod messages;
mod player;
mod server_config;

pub use error::PlayerError;
pub use events::{PlayerEvent, PlayerEvents};
pub use inventory::InventoryOracle;
pub use messages::{CommunityBroadcastBatch, InboundMessage, StashTabInsertRequest};
pub use player::{Player, PlayerInfo};
pub use server_config::ServerConfig;
