/// Integration tests for structural changes attempted during a traversal
///
/// A traversal in flight blocks member creation and destruction, and circle
/// setup and teardown. Once the traversal ends the same request succeeds.

use stronghold_shared::{CircleId, CommunityError, DbId};
use stronghold_test::{assert_membership_consistent, CommunityBuilder};

#[test]
fn member_walk_blocks_creation_until_finished() {
    let mut community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Friends])
        .member(3, &[CircleId::Friends])
        .build();

    let mut walk = community.member_walk(None);
    let first = walk.next(&community).map(|member| member.db_id());
    assert_eq!(first, Some(DbId::new(2)));

    assert!(matches!(
        community.add_member(DbId::new(4), "Rogue", CircleId::Friends),
        Err(CommunityError::IterationInProgress { active: 1, .. })
    ));
    assert!(community.get_member(DbId::new(4)).is_none());

    while walk.next(&community).is_some() {}
    assert!(walk.is_finished());
    assert_eq!(community.member_iterators_active(), 0);

    community
        .add_member(DbId::new(4), "Rogue", CircleId::Friends)
        .unwrap();
    assert_eq!(community.num_members(), 3);
}

#[test]
fn member_walk_blocks_destroying_last_circle() {
    let mut community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Friends, CircleId::Party])
        .build();

    let walk = community.member_walk(Some(CircleId::Friends));

    // leaving one of several circles destroys nothing
    community.remove_member(DbId::new(2), CircleId::Party).unwrap();
    assert!(community.get_member(DbId::new(2)).is_some());

    assert!(matches!(
        community.remove_member(DbId::new(2), CircleId::Friends),
        Err(CommunityError::IterationInProgress { .. })
    ));
    assert!(community
        .get_member(DbId::new(2))
        .is_some_and(|member| member.is_in_circle(CircleId::Friends)));
    assert_membership_consistent!(community);

    drop(walk);
    community.remove_member(DbId::new(2), CircleId::Friends).unwrap();
    assert!(community.get_member(DbId::new(2)).is_none());
}

#[test]
fn joining_another_circle_during_walk_is_allowed() {
    let mut community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Friends])
        .build();

    let _walk = community.member_walk(None);
    community
        .add_member(DbId::new(2), "Player2", CircleId::Guild)
        .unwrap();
    assert_eq!(community.num_members_in_circle(CircleId::Guild), 1);
}

#[test]
fn circle_walk_blocks_shutdown() {
    let mut community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Ignore])
        .build();

    let mut walk = community.circle_walk();
    let mut names = Vec::new();
    while let Some(circle) = walk.next(&community) {
        names.push(circle.name());
        assert_eq!(community.circle_iterators_active(), 1);
    }
    assert_eq!(community.circle_iterators_active(), 0);
    assert_eq!(names, vec!["Friends", "Ignore", "Nearby", "Party", "Guild"]);

    let walk = community.circle_walk();
    assert!(matches!(
        community.shutdown(),
        Err(CommunityError::IterationInProgress { .. })
    ));
    assert_eq!(community.num_members(), 1);

    drop(walk);
    community.shutdown().unwrap();
    assert_eq!(community.num_members(), 0);
    assert!(community.get_circle(CircleId::Friends).is_none());

    community.initialize().unwrap();
    assert!(community.get_circle(CircleId::Friends).is_some());
}

#[test]
fn early_break_releases_iteration() {
    let mut community = CommunityBuilder::new(1)
        .member(2, &[CircleId::Friends])
        .member(3, &[CircleId::Friends])
        .member(4, &[CircleId::Friends])
        .build();

    let found = community
        .iterate_members_in_circle(CircleId::Friends)
        .find(|member| member.db_id() == DbId::new(3))
        .map(|member| member.db_id());
    assert_eq!(found, Some(DbId::new(3)));
    assert_eq!(community.member_iterators_active(), 0);

    community.remove_member(DbId::new(3), CircleId::Friends).unwrap();
    assert_eq!(community.num_members(), 2);
}
