use std::default::Default;

use stronghold_shared::{ArchiveConfig, CommunityConfig, StashConfig};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Limits applied while decoding player archives
    pub archive: ArchiveConfig,
    /// Used to configure each player's stash tabs
    pub stash: StashConfig,
    /// Used to configure each player's community
    pub community: CommunityConfig,
}
