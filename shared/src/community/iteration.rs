use std::{
    collections::{btree_map, BTreeSet},
    ops::Bound,
    slice,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use super::{CircleId, Community, CommunityCircle, CommunityMember};
use crate::types::DbId;

/// Number of traversals currently in flight over one table
#[derive(Debug, Clone, Default)]
pub(crate) struct IterationCounter {
    active: Arc<AtomicUsize>,
}

impl IterationCounter {
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    pub fn enter(&self) -> IterationGuard {
        self.active.fetch_add(1, Ordering::Relaxed);
        IterationGuard {
            active: self.active.clone(),
        }
    }
}

/// Held for the whole of a traversal. Dropping it, on any exit path, ends it.
#[derive(Debug)]
pub(crate) struct IterationGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for IterationGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }
}

// Iterators

/// Lazy pass over the members of a community, optionally only those in one circle
pub struct MemberIter<'a> {
    guard: Option<IterationGuard>,
    inner: btree_map::Values<'a, DbId, CommunityMember>,
    filter: Option<CircleId>,
}

impl<'a> MemberIter<'a> {
    pub(crate) fn new(
        guard: IterationGuard,
        inner: btree_map::Values<'a, DbId, CommunityMember>,
        filter: Option<CircleId>,
    ) -> Self {
        Self {
            guard: Some(guard),
            inner,
            filter,
        }
    }
}

impl<'a> Iterator for MemberIter<'a> {
    type Item = &'a CommunityMember;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        let next = self
            .inner
            .find(|member| filter.map_or(true, |circle_id| member.is_in_circle(circle_id)));
        if next.is_none() {
            self.guard = None;
        }
        next
    }
}

/// Lazy pass over the circles of a community, optionally only those one member is in
pub struct CircleIter<'a> {
    guard: Option<IterationGuard>,
    inner: slice::Iter<'a, CommunityCircle>,
    filter: Option<&'a BTreeSet<CircleId>>,
}

impl<'a> CircleIter<'a> {
    pub(crate) fn new(
        guard: IterationGuard,
        inner: slice::Iter<'a, CommunityCircle>,
        filter: Option<&'a BTreeSet<CircleId>>,
    ) -> Self {
        Self {
            guard: Some(guard),
            inner,
            filter,
        }
    }
}

impl<'a> Iterator for CircleIter<'a> {
    type Item = &'a CommunityCircle;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        let next = self
            .inner
            .find(|circle| filter.map_or(true, |circles| circles.contains(&circle.id())));
        if next.is_none() {
            self.guard = None;
        }
        next
    }
}

// Walks

/// Detached, resumable pass over community members. Unlike [`MemberIter`] it
/// does not borrow the community between steps, so a traversal can be spread
/// over several calls; structural changes made while it is alive are rejected.
pub struct MemberWalk {
    guard: Option<IterationGuard>,
    last: Option<DbId>,
    filter: Option<CircleId>,
}

impl MemberWalk {
    pub(crate) fn new(guard: IterationGuard, filter: Option<CircleId>) -> Self {
        Self {
            guard: Some(guard),
            last: None,
            filter,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.guard.is_none()
    }

    pub fn next<'a>(&mut self, community: &'a Community) -> Option<&'a CommunityMember> {
        self.guard.as_ref()?;

        let lower = match self.last {
            Some(db_id) => Bound::Excluded(db_id),
            None => Bound::Unbounded,
        };
        let filter = self.filter;
        let next = community
            .members_table()
            .range((lower, Bound::Unbounded))
            .map(|(_, member)| member)
            .find(|member| filter.map_or(true, |circle_id| member.is_in_circle(circle_id)));

        match next {
            Some(member) => self.last = Some(member.db_id()),
            None => self.guard = None,
        }
        next
    }
}

/// Detached, resumable pass over community circles
pub struct CircleWalk {
    guard: Option<IterationGuard>,
    index: usize,
}

impl CircleWalk {
    pub(crate) fn new(guard: IterationGuard) -> Self {
        Self {
            guard: Some(guard),
            index: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.guard.is_none()
    }

    pub fn next<'a>(&mut self, community: &'a Community) -> Option<&'a CommunityCircle> {
        self.guard.as_ref()?;

        let next = community.circle_manager().circles().get(self.index);
        match next {
            Some(_) => self.index += 1,
            None => self.guard = None,
        }
        next
    }
}
