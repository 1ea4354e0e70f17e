/// Which remote audience a live replication frame is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicationPolicy {
    /// The client that owns the replicated entity
    Owner,
    /// Other clients that merely have the entity in view
    Proximity,
}

/// Destination channel of an archive. The same ordered schema is used for all
/// of them; the purpose only decides which optional blocks are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchivePurpose {
    /// Durable-storage snapshot
    Persistence,
    /// Live network sync
    Replication(ReplicationPolicy),
    /// Hand-off of a live entity to another server process
    Migration,
}

impl ArchivePurpose {
    pub fn is_persistent(&self) -> bool {
        matches!(self, ArchivePurpose::Persistence)
    }

    pub fn is_replication(&self) -> bool {
        matches!(self, ArchivePurpose::Replication(_))
    }

    pub fn is_migration(&self) -> bool {
        matches!(self, ArchivePurpose::Migration)
    }

    /// Whether state private to the owning player may be written. True for
    /// everything except replication to non-owning observers.
    pub fn includes_owner_state(&self) -> bool {
        !matches!(
            self,
            ArchivePurpose::Replication(ReplicationPolicy::Proximity)
        )
    }
}
