use std::default::Default;

/// Contains Config properties which will be used by a Community
#[derive(Clone, Debug, Default)]
pub struct CommunityConfig {
    /// Whether the latest presence snapshot of each member is written into
    /// durable-storage snapshots. Presence is always included in replication
    /// and migration archives.
    pub persist_presence: bool,
}
