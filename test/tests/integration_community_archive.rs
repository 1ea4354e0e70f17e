/// Integration tests for community archive round-trips
/// These tests verify which circles and which member fields survive each
/// destination channel.

use stronghold_shared::{
    decode_into, encode_to_vec, ArchivePurpose, AvatarSlot, CircleId, Community,
    CommunityBroadcast, CommunityConfig, DbId, PresenceSnapshot, PrototypeId, ReplicationPolicy,
};
use stronghold_test::{assert_membership_consistent, CommunityBuilder};

const CIRCLES: [CircleId; 5] = [
    CircleId::Friends,
    CircleId::Ignore,
    CircleId::Nearby,
    CircleId::Party,
    CircleId::Guild,
];

fn presence(region: u64) -> PresenceSnapshot {
    PresenceSnapshot {
        online: true,
        region_id: PrototypeId::new(region),
        difficulty_id: PrototypeId::new(3),
        avatar_slots: vec![AvatarSlot {
            avatar_id: PrototypeId::new(77),
            costume_id: PrototypeId::new(78),
            level: 60,
            prestige_level: 2,
        }],
    }
}

/// N members, each in a distinct non-empty subset of the M circles
fn grid_community(num_members: u64) -> Community {
    let mut builder = CommunityBuilder::new(1);
    for index in 0..num_members {
        let mask = (index % 31) + 1;
        let circles: Vec<CircleId> = CIRCLES
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, circle_id)| *circle_id)
            .collect();
        builder = builder.member(index + 2, &circles);
    }
    builder.build()
}

fn assert_same_structure(left: &Community, right: &Community) {
    assert_eq!(left.num_members(), right.num_members());
    for circle_id in CIRCLES {
        assert_eq!(
            left.num_members_in_circle(circle_id),
            right.num_members_in_circle(circle_id),
            "circle {} differs",
            circle_id
        );
    }
    for member in left.iterate_members() {
        let other = right
            .get_member(member.db_id())
            .unwrap_or_else(|| panic!("member {} missing", member.db_id()));
        assert_eq!(member.name(), other.name());
        assert_eq!(
            member.circles().collect::<Vec<_>>(),
            other.circles().collect::<Vec<_>>()
        );
        assert_eq!(member.latest_broadcast(), other.latest_broadcast());
    }
}

#[test]
fn migration_round_trip_preserves_structure() {
    let mut community = grid_community(40);
    community
        .receive_broadcast(&CommunityBroadcast {
            member_db_id: DbId::new(2),
            snapshot: presence(10),
        })
        .unwrap();

    let bytes = encode_to_vec(&mut community, ArchivePurpose::Migration).unwrap();
    let mut restored = Community::new(DbId::new(1), CommunityConfig::default());
    decode_into(&bytes, &mut restored, ArchivePurpose::Migration).unwrap();

    assert_same_structure(&community, &restored);
    assert_membership_consistent!(restored);
}

#[test]
fn owner_replication_round_trip_preserves_structure() {
    let purpose = ArchivePurpose::Replication(ReplicationPolicy::Owner);
    let mut community = grid_community(12);

    let bytes = encode_to_vec(&mut community, purpose).unwrap();
    let mut restored = Community::new(DbId::new(1), CommunityConfig::default());
    decode_into(&bytes, &mut restored, purpose).unwrap();

    assert_same_structure(&community, &restored);
}

#[test]
fn persistence_keeps_only_persistent_circles() {
    let mut community = grid_community(31);
    let bytes = encode_to_vec(&mut community, ArchivePurpose::Persistence).unwrap();

    let mut restored = Community::new(DbId::new(1), CommunityConfig::default());
    decode_into(&bytes, &mut restored, ArchivePurpose::Persistence).unwrap();

    for circle_id in [CircleId::Nearby, CircleId::Party, CircleId::Guild] {
        assert_eq!(restored.num_members_in_circle(circle_id), 0);
    }
    for circle_id in [CircleId::Friends, CircleId::Ignore] {
        assert_eq!(
            restored.num_members_in_circle(circle_id),
            community.num_members_in_circle(circle_id)
        );
    }

    let expected = community
        .iterate_members()
        .filter(|member| member.is_in_circle(CircleId::Friends) || member.is_in_circle(CircleId::Ignore))
        .count();
    assert_eq!(restored.num_members(), expected);
    assert_membership_consistent!(restored);
}

#[test]
fn presence_is_persisted_only_when_configured() {
    let broadcast = CommunityBroadcast {
        member_db_id: DbId::new(2),
        snapshot: presence(44),
    };

    let mut default_community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Friends])
        .build();
    default_community.receive_broadcast(&broadcast).unwrap();
    let bytes = encode_to_vec(&mut default_community, ArchivePurpose::Persistence).unwrap();
    let mut restored = Community::new(DbId::new(1), CommunityConfig::default());
    decode_into(&bytes, &mut restored, ArchivePurpose::Persistence).unwrap();
    assert_eq!(
        restored.get_member(DbId::new(2)).unwrap().latest_broadcast(),
        &PresenceSnapshot::default()
    );

    let mut persisting = CommunityBuilder::new(1)
        .persist_presence()
        .member(2, &[CircleId::Friends])
        .build();
    persisting.receive_broadcast(&broadcast).unwrap();
    let bytes = encode_to_vec(&mut persisting, ArchivePurpose::Persistence).unwrap();
    let mut restored = Community::new(
        DbId::new(1),
        CommunityConfig {
            persist_presence: true,
        },
    );
    decode_into(&bytes, &mut restored, ArchivePurpose::Persistence).unwrap();
    assert_eq!(
        restored.get_member(DbId::new(2)).unwrap().latest_broadcast(),
        &broadcast.snapshot
    );
}

#[test]
fn truncated_stream_reports_failure() {
    let mut community = grid_community(8);
    let mut bytes = encode_to_vec(&mut community, ArchivePurpose::Migration).unwrap();
    bytes.truncate(bytes.len() - 3);

    let mut restored = Community::new(DbId::new(1), CommunityConfig::default());
    assert!(decode_into(&bytes, &mut restored, ArchivePurpose::Migration).is_err());
    assert_membership_consistent!(restored);
}
