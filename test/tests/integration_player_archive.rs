/// Integration tests for whole-player snapshots and inbound message handling

use stronghold_server::{
    InboundMessage, PlayerError, PlayerEvent, ServerConfig, StashTabInsertRequest,
};
use stronghold_shared::{
    ArchivePurpose, AssetId, BitWriter, CircleId, DbId, ReplicationPolicy, Serde, StashConfig,
    StashTabColor, StashTabOptionsUpdate,
};
use stronghold_test::{
    assert_dense_permutation, assert_membership_consistent, test_player::STASH_INVENTORIES,
    TestInventory, TestPlayerBuilder,
};

fn write_message(message: &InboundMessage) -> Vec<u8> {
    let mut writer = BitWriter::new();
    message.ser(&mut writer);
    writer.to_bytes()
}

fn populated_player() -> stronghold_server::Player {
    let (mut player, _) = TestPlayerBuilder::new(1).name("Deadpool").unlocked_stashes(3).build();
    for (position, tab_id) in STASH_INVENTORIES.iter().take(3).enumerate() {
        player.stash_tab_insert(*tab_id, position as i32).unwrap();
    }
    player
        .update_stash_tab_options(&StashTabOptionsUpdate {
            tab_id: STASH_INVENTORIES[1],
            display_name: Some("Artifacts".into()),
            icon_asset_id: Some(AssetId::new(900)),
            color: Some(StashTabColor::Purple),
        })
        .unwrap();
    player
        .add_community_member(DbId::new(20), "Domino", CircleId::Friends)
        .unwrap();
    player
        .add_community_member(DbId::new(21), "Cable", CircleId::Party)
        .unwrap();
    player
}

#[test]
fn persistence_snapshot_restores_owner_state() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut player = populated_player();
    let bytes = player.encode(ArchivePurpose::Persistence).unwrap();

    let (mut restored, _) = TestPlayerBuilder::new(1).unlocked_stashes(3).build();
    restored.decode(&bytes, ArchivePurpose::Persistence).unwrap();

    assert_eq!(restored.name(), "Deadpool");
    assert!(!restored.has_console_ui());
    assert_eq!(
        restored.stash_tabs().tabs_in_order(),
        player.stash_tabs().tabs_in_order()
    );
    let options = restored.stash_tabs().options(STASH_INVENTORIES[1]).unwrap();
    assert_eq!(options.display_name, "Artifacts");
    assert_eq!(options.icon_asset_id, AssetId::new(900));
    assert_eq!(options.color, StashTabColor::Purple);
    assert_dense_permutation!(restored.stash_tabs());

    let community = restored.community();
    assert!(community.get_member(DbId::new(20)).is_some());
    assert!(community.get_member(DbId::new(21)).is_none());
    assert_membership_consistent!(community);
}

#[test]
fn every_purpose_decodes_cleanly() {
    let purposes = [
        ArchivePurpose::Persistence,
        ArchivePurpose::Migration,
        ArchivePurpose::Replication(ReplicationPolicy::Owner),
        ArchivePurpose::Replication(ReplicationPolicy::Proximity),
    ];

    for purpose in purposes {
        let mut player = populated_player();
        let bytes = player.encode(purpose).unwrap();

        let (mut restored, _) = TestPlayerBuilder::new(1).build();
        restored.decode(&bytes, purpose).unwrap();
        assert_eq!(restored.name(), "Deadpool", "{:?}", purpose);

        let expected_members = match purpose {
            ArchivePurpose::Persistence => 1,
            ArchivePurpose::Replication(ReplicationPolicy::Proximity) => 0,
            _ => 2,
        };
        assert_eq!(restored.community().num_members(), expected_members, "{:?}", purpose);
        assert_eq!(
            restored.stash_tabs().len(),
            if purpose.includes_owner_state() { 3 } else { 0 },
            "{:?}",
            purpose
        );
    }
}

#[test]
fn long_names_are_truncated_on_decode() {
    let mut player = populated_player();
    let bytes = player.encode(ArchivePurpose::Migration).unwrap();

    let config = ServerConfig {
        stash: StashConfig {
            max_display_name_chars: 4,
        },
        ..Default::default()
    };
    let (mut restored, _) = TestPlayerBuilder::new(1).config(config).build();
    restored.decode(&bytes, ArchivePurpose::Migration).unwrap();

    let options = restored.stash_tabs().options(STASH_INVENTORIES[1]).unwrap();
    assert_eq!(options.display_name, "Arti");
}

#[test]
fn messages_from_bytes_reach_handlers() {
    let (mut player, inventory) = TestPlayerBuilder::new(2).unlocked_stashes(2).build();
    let first = STASH_INVENTORIES[0];
    let second = STASH_INVENTORIES[1];

    for (tab_id, position) in [(first, 0), (second, 1), (first, 1)] {
        let message = InboundMessage::StashTabInsert(StashTabInsertRequest { tab_id, position });
        player.receive_message(&write_message(&message)).unwrap();
    }
    assert_eq!(player.stash_tabs().tabs_in_order(), vec![second, first]);

    let locked = STASH_INVENTORIES[3];
    let message = InboundMessage::StashTabInsert(StashTabInsertRequest {
        tab_id: locked,
        position: 0,
    });
    assert_eq!(
        player.receive_message(&write_message(&message)),
        Err(PlayerError::StashTabLocked { tab_id: locked })
    );

    player.unlock_stash_tab(locked).unwrap();
    assert!(inventory.owns(locked));
    player.receive_message(&write_message(&message)).unwrap();
    assert_eq!(player.stash_tabs().tabs_in_order(), vec![locked, second, first]);

    let events: Vec<PlayerEvent> = player.take_events().collect();
    assert_eq!(events.last(), Some(&PlayerEvent::StashTabsReordered));
    assert!(events.contains(&PlayerEvent::StashTabUnlocked { tab_id: locked }));
}

#[test]
fn refused_unlock_is_reported() {
    let (mut player, _) = TestPlayerBuilder::new(3)
        .inventory(TestInventory::refusing())
        .build();

    assert_eq!(
        player.unlock_stash_tab(STASH_INVENTORIES[0]),
        Err(PlayerError::InventoryRejected {
            tab_id: STASH_INVENTORIES[0]
        })
    );
    assert!(player.get_stash_tabs(false, true).is_empty());
    assert_eq!(player.get_stash_tabs(true, false), STASH_INVENTORIES.to_vec());
}
