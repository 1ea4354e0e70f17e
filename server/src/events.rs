use std::{mem, vec::IntoIter};

use stronghold_shared::{CircleId, DbId, PrototypeId};

/// A change the owning client has to be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    MemberAdded { db_id: DbId, circle_id: CircleId },
    MemberRemoved { db_id: DbId, circle_id: CircleId },
    MemberPresenceUpdated { db_id: DbId },
    StashTabsReordered,
    StashTabOptionsChanged { tab_id: PrototypeId },
    StashTabUnlocked { tab_id: PrototypeId },
}

/// Events collected since the last call to [`PlayerEvents::take`]
#[derive(Debug, Default)]
pub struct PlayerEvents {
    events: Vec<PlayerEvent>,
}

impl PlayerEvents {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: PlayerEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Moves every collected event out, oldest first
    pub fn take(&mut self) -> IntoIter<PlayerEvent> {
        mem::take(&mut self.events).into_iter()
    }
}
