use stronghold_shared::PrototypeId;

/// Narrow view of the inventory system used to tell locked stash tabs from
/// unlocked ones. Item placement and inventory contents stay behind it.
pub trait InventoryOracle: Send {
    /// Whether the player already owns this inventory
    fn has_inventory(&self, inventory_id: PrototypeId) -> bool;

    /// Creates the inventory. Returns false if the inventory system refused.
    fn add_inventory(&mut self, inventory_id: PrototypeId) -> bool;
}
