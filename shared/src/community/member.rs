use std::collections::BTreeSet;

use super::{CircleId, PresenceSnapshot};
use crate::{
    archive::{Archive, ArchivePurpose},
    types::DbId,
};

/// Cached, non-authoritative record of a remote player
#[derive(Debug, Clone)]
pub struct CommunityMember {
    db_id: DbId,
    name: String,
    circles: BTreeSet<CircleId>,
    latest_broadcast: PresenceSnapshot,
    // transferred verbatim, no meaning assigned on this side
    reserved: u64,
}

impl CommunityMember {
    pub(crate) fn new(db_id: DbId, name: String) -> Self {
        Self {
            db_id,
            name,
            circles: BTreeSet::new(),
            latest_broadcast: PresenceSnapshot::default(),
            reserved: 0,
        }
    }

    pub fn db_id(&self) -> DbId {
        self.db_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latest_broadcast(&self) -> &PresenceSnapshot {
        &self.latest_broadcast
    }

    pub fn is_online(&self) -> bool {
        self.latest_broadcast.online
    }

    pub fn is_in_circle(&self, circle_id: CircleId) -> bool {
        self.circles.contains(&circle_id)
    }

    pub fn circles(&self) -> impl Iterator<Item = CircleId> + '_ {
        self.circles.iter().copied()
    }

    pub fn num_circles(&self) -> usize {
        self.circles.len()
    }

    pub(crate) fn circle_set(&self) -> &BTreeSet<CircleId> {
        &self.circles
    }

    pub(crate) fn add_circle(&mut self, circle_id: CircleId) -> bool {
        self.circles.insert(circle_id)
    }

    pub(crate) fn remove_circle(&mut self, circle_id: CircleId) -> bool {
        self.circles.remove(&circle_id)
    }

    pub(crate) fn set_broadcast(&mut self, snapshot: PresenceSnapshot) {
        self.latest_broadcast = snapshot;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_reserved(&mut self, reserved: u64) {
        self.reserved = reserved;
    }

    /// Membership mask restricted to the circles the archive may carry
    pub fn circle_bits(&self, purpose: ArchivePurpose) -> u64 {
        self.circles
            .iter()
            .filter(|id| id.should_archive_to(purpose))
            .fold(0, |bits, id| bits | id.bit())
    }

    pub fn should_archive_to(&self, purpose: ArchivePurpose) -> bool {
        self.circle_bits(purpose) != 0
    }

    /// Per-member fields following the name and id written by the community.
    /// Circle membership is handed back through `circle_bits` and the presence
    /// flag through `include_presence`, because applying either on decode
    /// needs the owning community.
    pub(crate) fn transfer_fields(
        &mut self,
        archive: &mut Archive,
        circle_bits: &mut u64,
        include_presence: &mut bool,
    ) -> bool {
        let mut success = true;
        success &= archive.transfer_varint("circle_bits", circle_bits);
        success &= archive.transfer_flag("has_presence", include_presence);
        if *include_presence {
            success &= archive.transfer_nested(&mut self.latest_broadcast);
        }
        success &= archive.transfer_varint("reserved", &mut self.reserved);
        success
    }

    pub(crate) fn reserved(&self) -> u64 {
        self.reserved
    }
}
