use thiserror::Error;

use stronghold_shared::{
    ArchiveError, CommunityError, PrototypeId, ReplicationId, SerdeErr, StashTabError,
};

/// Errors that can occur while operating on a Player
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Community(#[from] CommunityError),

    #[error(transparent)]
    StashTab(#[from] StashTabError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The tab is not one of the stash inventories this player can own
    #[error("{tab_id} is not a stash inventory of this player")]
    UnknownStashInventory { tab_id: PrototypeId },

    /// The stash inventory exists in the player's list but is not unlocked yet
    #[error("Stash inventory {tab_id} is locked")]
    StashTabLocked { tab_id: PrototypeId },

    /// The inventory system refused to create the stash inventory
    #[error("Inventory system refused to add stash inventory {tab_id}")]
    InventoryRejected { tab_id: PrototypeId },

    /// The player's scalars need two consecutive replication ids
    #[error("No replication id follows {first_replication_id}")]
    ReplicationIdsExhausted { first_replication_id: ReplicationId },

    /// An inbound message could not be read
    #[error("Malformed inbound message: {source}")]
    MalformedMessage {
        #[source]
        source: SerdeErr,
    },
}
