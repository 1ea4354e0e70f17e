use stronghold_shared::{DbId, PrototypeId, ReplicationId};

/// What the login service knows about a player before its state is loaded
#[derive(Clone, Debug)]
pub struct PlayerInfo {
    pub db_id: DbId,
    pub name: String,
    /// First of the replication ids reserved for this player's scalars
    pub first_replication_id: ReplicationId,
    /// Stash inventories the player can own, in display order
    pub stash_inventories: Vec<PrototypeId>,
}
