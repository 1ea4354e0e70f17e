/// Concrete end-to-end scenarios for stash ordering and community membership

use stronghold_shared::{
    CircleId, Community, CommunityBroadcast, CommunityConfig, CommunityError, DbId,
    PresenceSnapshot, PrototypeId, StashConfig, StashTabs,
};
use stronghold_test::{assert_dense_permutation, assert_membership_consistent};

const A: PrototypeId = PrototypeId::new(0xA);
const B: PrototypeId = PrototypeId::new(0xB);
const C: PrototypeId = PrototypeId::new(0xC);

fn order_of(stash_tabs: &StashTabs, tab_id: PrototypeId) -> u32 {
    stash_tabs.options(tab_id).unwrap().sort_order
}

#[test]
fn moving_first_tab_to_end() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut stash_tabs = StashTabs::new(StashConfig::default());
    stash_tabs.insert(A, 0).unwrap();
    stash_tabs.insert(B, 1).unwrap();
    stash_tabs.insert(C, 2).unwrap();
    assert_eq!(stash_tabs.tabs_in_order(), vec![A, B, C]);

    stash_tabs.insert(A, 2).unwrap();

    assert_eq!(order_of(&stash_tabs, B), 0);
    assert_eq!(order_of(&stash_tabs, C), 1);
    assert_eq!(order_of(&stash_tabs, A), 2);
    assert_dense_permutation!(stash_tabs);
}

#[test]
fn single_tab_keeps_default_order() {
    let mut stash_tabs = StashTabs::new(StashConfig::default());
    assert!(stash_tabs.insert(A, 5).is_ok());

    assert_eq!(stash_tabs.len(), 1);
    assert_eq!(order_of(&stash_tabs, A), 0);
    assert_dense_permutation!(stash_tabs);
}

#[test]
fn add_then_remove_forgets_member() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut community = Community::new(DbId::new(1), CommunityConfig::default());
    community
        .add_member(DbId::new(7), "Rogue", CircleId::Friends)
        .unwrap();
    assert_eq!(community.num_members(), 1);

    community.remove_member(DbId::new(7), CircleId::Friends).unwrap();

    assert!(community.get_member(DbId::new(7)).is_none());
    assert!(community.get_member_by_name("Rogue").is_none());
    assert_eq!(community.num_members(), 0);
    assert_eq!(community.num_members_in_circle(CircleId::Friends), 0);
}

#[test]
fn member_destroyed_with_last_circle_only() {
    let mut community = Community::new(DbId::new(1), CommunityConfig::default());
    let db_id = DbId::new(7);
    for circle_id in [CircleId::Friends, CircleId::Party, CircleId::Guild] {
        community.add_member(db_id, "Rogue", circle_id).unwrap();
    }

    community.remove_member(db_id, CircleId::Party).unwrap();
    community.remove_member(db_id, CircleId::Friends).unwrap();
    assert_eq!(community.get_member(db_id).unwrap().num_circles(), 1);
    assert_membership_consistent!(community);

    community.remove_member(db_id, CircleId::Guild).unwrap();
    assert!(community.get_member(db_id).is_none());
    assert_membership_consistent!(community);
}

#[test]
fn broadcast_never_creates_member() {
    let mut community = Community::new(DbId::new(1), CommunityConfig::default());
    let snapshot = PresenceSnapshot {
        online: true,
        region_id: PrototypeId::new(12),
        ..Default::default()
    };

    let unknown = CommunityBroadcast {
        member_db_id: DbId::new(9),
        snapshot: snapshot.clone(),
    };
    assert_eq!(
        community.receive_broadcast(&unknown),
        Err(CommunityError::MemberNotFound {
            db_id: DbId::new(9)
        })
    );
    assert_eq!(community.num_members(), 0);

    community
        .add_member(DbId::new(9), "Storm", CircleId::Nearby)
        .unwrap();
    community.receive_broadcast(&unknown).unwrap();
    let member = community.get_member(DbId::new(9)).unwrap();
    assert!(member.is_online());
    assert_eq!(member.latest_broadcast(), &snapshot);

    // a newer snapshot replaces the whole record
    community
        .receive_broadcast(&CommunityBroadcast {
            member_db_id: DbId::new(9),
            snapshot: PresenceSnapshot::default(),
        })
        .unwrap();
    assert_eq!(
        community.get_member(DbId::new(9)).unwrap().latest_broadcast(),
        &PresenceSnapshot::default()
    );
}
