use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use super::{
    iteration::IterationCounter, CircleId, CircleIter, CircleManager, CircleWalk,
    CommunityBroadcast, CommunityCircle, CommunityConfig, CommunityError, CommunityMember,
    MemberIter, MemberWalk,
};
use crate::{
    archive::{Archive, ArchiveError, ArchivePurpose, Transfer},
    types::DbId,
};

/// Social graph of one owning player: the system circles and a cached record
/// of every remote player in at least one of them.
///
/// Circle membership is stored twice, as the member set of each circle and
/// as the circle set of each member. Every operation updates both sides.
pub struct Community {
    owner_db_id: DbId,
    config: CommunityConfig,
    members: BTreeMap<DbId, CommunityMember>,
    circle_manager: CircleManager,
    circle_iterators: IterationCounter,
    member_iterators: IterationCounter,
}

impl Community {
    pub fn new(owner_db_id: DbId, config: CommunityConfig) -> Self {
        let mut circle_manager = CircleManager::new();
        circle_manager.initialize();

        Self {
            owner_db_id,
            config,
            members: BTreeMap::new(),
            circle_manager,
            circle_iterators: IterationCounter::default(),
            member_iterators: IterationCounter::default(),
        }
    }

    pub fn owner_db_id(&self) -> DbId {
        self.owner_db_id
    }

    /// Recreates the system circles after a [`Community::shutdown`]
    pub fn initialize(&mut self) -> Result<(), CommunityError> {
        self.check_no_circle_iteration("initialize circles")?;
        self.circle_manager.initialize();
        Ok(())
    }

    /// Drops every member and circle. The community can be initialized again.
    pub fn shutdown(&mut self) -> Result<(), CommunityError> {
        self.check_no_member_iteration("shut down")?;
        self.check_no_circle_iteration("shut down")?;

        debug!(
            "Community of {}: shutting down with {} member(s)",
            self.owner_db_id,
            self.members.len()
        );
        self.members.clear();
        self.circle_manager.shutdown();
        Ok(())
    }

    // Lookup

    pub fn circle_manager(&self) -> &CircleManager {
        &self.circle_manager
    }

    pub fn get_circle(&self, circle_id: CircleId) -> Option<&CommunityCircle> {
        self.circle_manager.get_circle(circle_id)
    }

    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    pub fn get_member(&self, db_id: DbId) -> Option<&CommunityMember> {
        self.members.get(&db_id)
    }

    /// First member whose name matches exactly. Names are not unique; with
    /// duplicates the member with the lowest id wins.
    pub fn get_member_by_name(&self, name: &str) -> Option<&CommunityMember> {
        self.members.values().find(|member| member.name() == name)
    }

    /// Scans every member; member tables are small enough that no per-circle
    /// index is kept.
    pub fn num_members_in_circle(&self, circle_id: CircleId) -> usize {
        self.members
            .values()
            .filter(|member| member.is_in_circle(circle_id))
            .count()
    }

    pub(crate) fn members_table(&self) -> &BTreeMap<DbId, CommunityMember> {
        &self.members
    }

    pub fn member_iterators_active(&self) -> usize {
        self.member_iterators.active()
    }

    pub fn circle_iterators_active(&self) -> usize {
        self.circle_iterators.active()
    }

    // Membership

    /// Adds the player to a circle, creating the member record on first reference
    pub fn add_member(
        &mut self,
        db_id: DbId,
        name: &str,
        circle_id: CircleId,
    ) -> Result<(), CommunityError> {
        if self.circle_manager.get_circle(circle_id).is_none() {
            warn!("Community::add_member(): circle {} not found", circle_id);
            return Err(CommunityError::CircleNotFound { circle_id });
        }

        match self.members.get(&db_id) {
            Some(member) if member.is_in_circle(circle_id) => {
                warn!(
                    "Community::add_member(): {} is already in circle {}",
                    db_id, circle_id
                );
                return Err(CommunityError::AlreadyInCircle { db_id, circle_id });
            }
            Some(_) => {}
            None => self.create_member(db_id, name)?,
        }

        self.link(db_id, circle_id);
        Ok(())
    }

    /// Removes the player from one circle. The member record is destroyed
    /// together with its last circle.
    pub fn remove_member(&mut self, db_id: DbId, circle_id: CircleId) -> Result<(), CommunityError> {
        if self.circle_manager.get_circle(circle_id).is_none() {
            warn!("Community::remove_member(): circle {} not found", circle_id);
            return Err(CommunityError::CircleNotFound { circle_id });
        }

        let Some(member) = self.members.get(&db_id) else {
            warn!("Community::remove_member(): member {} not found", db_id);
            return Err(CommunityError::MemberNotFound { db_id });
        };

        if !member.is_in_circle(circle_id) {
            warn!(
                "Community::remove_member(): {} is not in circle {}",
                db_id, circle_id
            );
            return Err(CommunityError::NotInCircle { db_id, circle_id });
        }

        if member.num_circles() == 1 {
            self.check_no_member_iteration("destroy a member")?;
        }

        self.unlink(db_id, circle_id);
        if self
            .members
            .get(&db_id)
            .is_some_and(|member| member.num_circles() == 0)
        {
            self.destroy_member(db_id)?;
        }
        Ok(())
    }

    /// Replaces the cached presence of an existing member. Never creates one.
    pub fn receive_broadcast(&mut self, broadcast: &CommunityBroadcast) -> Result<(), CommunityError> {
        let db_id = broadcast.member_db_id;
        let Some(member) = self.members.get_mut(&db_id) else {
            warn!(
                "Community::receive_broadcast(): no member {} for broadcast",
                db_id
            );
            return Err(CommunityError::MemberNotFound { db_id });
        };

        member.set_broadcast(broadcast.snapshot.clone());
        Ok(())
    }

    fn link(&mut self, db_id: DbId, circle_id: CircleId) {
        if let Some(member) = self.members.get_mut(&db_id) {
            member.add_circle(circle_id);
        }
        if let Some(circle) = self.circle_manager.get_circle_mut(circle_id) {
            circle.insert(db_id);
        }
    }

    fn unlink(&mut self, db_id: DbId, circle_id: CircleId) {
        if let Some(member) = self.members.get_mut(&db_id) {
            member.remove_circle(circle_id);
        }
        if let Some(circle) = self.circle_manager.get_circle_mut(circle_id) {
            circle.remove(db_id);
        }
    }

    // Structural changes

    fn create_member(&mut self, db_id: DbId, name: &str) -> Result<(), CommunityError> {
        if !db_id.is_valid() {
            warn!("Community::create_member(): {} is not a valid id", db_id);
            return Err(CommunityError::InvalidDbId { db_id });
        }
        self.check_no_member_iteration("create a member")?;

        debug!("Community of {}: created member {} ({})", self.owner_db_id, db_id, name);
        self.members
            .insert(db_id, CommunityMember::new(db_id, name.to_string()));
        Ok(())
    }

    fn destroy_member(&mut self, db_id: DbId) -> Result<(), CommunityError> {
        self.check_no_member_iteration("destroy a member")?;

        let Some(member) = self.members.remove(&db_id) else {
            return Err(CommunityError::MemberNotFound { db_id });
        };
        for circle in self.circle_manager.circles_mut() {
            circle.remove(db_id);
        }

        debug!(
            "Community of {}: destroyed member {} ({})",
            self.owner_db_id,
            db_id,
            member.name()
        );
        Ok(())
    }

    fn check_no_member_iteration(&self, operation: &'static str) -> Result<(), CommunityError> {
        let active = self.member_iterators.active();
        if active > 0 {
            warn!(
                "Community of {}: cannot {} while {} member iteration(s) are active",
                self.owner_db_id, operation, active
            );
            return Err(CommunityError::IterationInProgress { operation, active });
        }
        Ok(())
    }

    fn check_no_circle_iteration(&self, operation: &'static str) -> Result<(), CommunityError> {
        let active = self.circle_iterators.active();
        if active > 0 {
            warn!(
                "Community of {}: cannot {} while {} circle iteration(s) are active",
                self.owner_db_id, operation, active
            );
            return Err(CommunityError::IterationInProgress { operation, active });
        }
        Ok(())
    }

    // Iteration

    pub fn iterate_members(&self) -> MemberIter<'_> {
        MemberIter::new(self.member_iterators.enter(), self.members.values(), None)
    }

    pub fn iterate_members_in_circle(&self, circle_id: CircleId) -> MemberIter<'_> {
        MemberIter::new(
            self.member_iterators.enter(),
            self.members.values(),
            Some(circle_id),
        )
    }

    pub fn iterate_circles(&self) -> CircleIter<'_> {
        CircleIter::new(
            self.circle_iterators.enter(),
            self.circle_manager.circles().iter(),
            None,
        )
    }

    /// Circles the given member belongs to; empty if the member is unknown
    pub fn iterate_circles_of_member(&self, db_id: DbId) -> CircleIter<'_> {
        let member_circles = self.members.get(&db_id).map(|member| member.circle_set());
        let circles = match member_circles {
            Some(_) => self.circle_manager.circles().iter(),
            None => Default::default(),
        };
        CircleIter::new(self.circle_iterators.enter(), circles, member_circles)
    }

    pub fn member_walk(&self, filter: Option<CircleId>) -> MemberWalk {
        MemberWalk::new(self.member_iterators.enter(), filter)
    }

    pub fn circle_walk(&self) -> CircleWalk {
        CircleWalk::new(self.circle_iterators.enter())
    }

    /// True if every circle's member set agrees with every member's circle set
    pub fn is_membership_consistent(&self) -> bool {
        let circles_agree = self.circle_manager.circles().iter().all(|circle| {
            circle.members().all(|db_id| {
                self.members
                    .get(&db_id)
                    .is_some_and(|member| member.is_in_circle(circle.id()))
            })
        });
        let members_agree = self.members.values().all(|member| {
            member.circles().all(|circle_id| {
                self.circle_manager
                    .get_circle(circle_id)
                    .is_some_and(|circle| circle.contains(member.db_id()))
            })
        });
        circles_agree && members_agree
    }

    // Decode

    /// Applies one fully read member record. Membership is mirrored for
    /// every circle the archive carries; circles outside the archive are
    /// untouched. A record that would leave the member in no circle removes
    /// the member instead, and nothing changes when that removal is blocked.
    fn apply_decoded_member(
        &mut self,
        archive: &mut Archive,
        decoded: CommunityMember,
        circle_bits: u64,
        include_presence: bool,
    ) -> bool {
        let db_id = decoded.db_id();
        let purpose = archive.purpose();

        let mut wanted: BTreeSet<CircleId> = BTreeSet::new();
        for circle_id in CircleId::SYSTEM {
            if !circle_id.should_archive_to(purpose) || circle_bits & circle_id.bit() == 0 {
                continue;
            }
            if self.circle_manager.get_circle(circle_id).is_none() {
                warn!(
                    "Community of {}: decoded member {} references missing circle {}",
                    self.owner_db_id, db_id, circle_id
                );
                continue;
            }
            wanted.insert(circle_id);
        }

        let kept = self.members.get(&db_id).map_or(0, |member| {
            member
                .circles()
                .filter(|circle_id| !circle_id.should_archive_to(purpose))
                .count()
        });

        if wanted.is_empty() && kept == 0 {
            if !self.members.contains_key(&db_id) {
                warn!(
                    "Community of {}: decoded member {} is in no circle, skipping it",
                    self.owner_db_id, db_id
                );
                return true;
            }
            warn!(
                "Community of {}: decoded member {} is in no circle, dropping it",
                self.owner_db_id, db_id
            );
            if let Err(error) = self.destroy_member(db_id) {
                return archive.record_failure(ArchiveError::FieldRejected {
                    field: "member_db_id",
                    reason: error.to_string(),
                });
            }
            return true;
        }

        if !self.members.contains_key(&db_id) {
            if let Err(error) = self.create_member(db_id, decoded.name()) {
                return archive.record_failure(ArchiveError::FieldRejected {
                    field: "member_db_id",
                    reason: error.to_string(),
                });
            }
        }

        if let Some(member) = self.members.get_mut(&db_id) {
            if member.name() != decoded.name() {
                debug!(
                    "Community of {}: member {} renamed from {} to {}",
                    self.owner_db_id,
                    db_id,
                    member.name(),
                    decoded.name()
                );
                member.set_name(decoded.name().to_string());
            }
            member.set_reserved(decoded.reserved());
            if include_presence {
                member.set_broadcast(decoded.latest_broadcast().clone());
            }
        }

        for circle_id in CircleId::SYSTEM {
            if !circle_id.should_archive_to(purpose) {
                continue;
            }
            if wanted.contains(&circle_id) {
                self.link(db_id, circle_id);
            } else {
                self.unlink(db_id, circle_id);
            }
        }
        true
    }

    fn should_include_presence(&self, purpose: ArchivePurpose) -> bool {
        !purpose.is_persistent() || self.config.persist_presence
    }
}

impl Transfer for Community {
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let mut success = true;
        success &= self.circle_manager.transfer(archive);

        let purpose = archive.purpose();

        if archive.is_encoding() {
            let include_presence = self.should_include_presence(purpose);
            let mut archived: Vec<&mut CommunityMember> = self
                .members
                .values_mut()
                .filter(|member| member.should_archive_to(purpose))
                .collect();

            let mut num_members = archived.len() as u32;
            success &= archive.transfer_count("num_members", &mut num_members);

            for member in archived.iter_mut() {
                let mut name = member.name().to_string();
                let mut db_id = member.db_id();
                let mut circle_bits = member.circle_bits(purpose);
                let mut has_presence = include_presence;

                success &= archive.transfer("member_name", &mut name);
                success &= archive.transfer("member_db_id", &mut db_id);
                success &= member.transfer_fields(archive, &mut circle_bits, &mut has_presence);
            }
            return success;
        }

        let mut num_members = 0u32;
        success &= archive.transfer_count("num_members", &mut num_members);

        for _ in 0..num_members {
            let mut name = String::new();
            let mut db_id = DbId::INVALID;
            let mut record_ok = true;
            record_ok &= archive.transfer("member_name", &mut name);
            record_ok &= archive.transfer("member_db_id", &mut db_id);

            // fields are read into a scratch record first so the stream stays
            // aligned even when the record is later refused
            let mut decoded = CommunityMember::new(db_id, name);
            let mut circle_bits = 0u64;
            let mut has_presence = false;
            record_ok &= decoded.transfer_fields(archive, &mut circle_bits, &mut has_presence);

            success &= record_ok;
            if !record_ok {
                warn!(
                    "Community of {}: skipping partially read member record {}",
                    self.owner_db_id, db_id
                );
                continue;
            }
            success &= self.apply_decoded_member(archive, decoded, circle_bits, has_presence);
        }

        success
    }
}
