use thiserror::Error;

use crate::types::PrototypeId;

/// Errors that can occur during stash tab operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StashTabError {
    /// The tab id does not name a stash inventory
    #[error("{tab_id} is not a valid stash tab")]
    InvalidTabId { tab_id: PrototypeId },

    /// Tab positions start at zero
    #[error("Cannot move stash tab {tab_id} to negative position {position}")]
    NegativePosition { tab_id: PrototypeId, position: i32 },

    /// The tab already sits at the requested position
    #[error("Stash tab {tab_id} is already at position {position}")]
    AlreadyAtPosition { tab_id: PrototypeId, position: u32 },

    /// No options are stored for this tab
    #[error("Stash tab {tab_id} not found")]
    TabNotFound { tab_id: PrototypeId },
}
