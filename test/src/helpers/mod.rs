pub mod community_builder;

pub use community_builder::CommunityBuilder;
pub use test_inventory::TestInventory;
pub use test_player::TestPlayerBuilder;
