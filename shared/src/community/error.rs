use thiserror::Error;

use super::CircleId;
use crate::types::DbId;

/// Errors that can occur during Community operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommunityError {
    /// The named circle does not exist in this community
    #[error("Circle {circle_id} not found")]
    CircleNotFound { circle_id: CircleId },

    /// No member with this database id is cached
    #[error("Member {db_id} not found")]
    MemberNotFound { db_id: DbId },

    /// Members must have a non-zero database id
    #[error("{db_id} is not a valid member id")]
    InvalidDbId { db_id: DbId },

    /// The member already belongs to the circle
    #[error("Member {db_id} is already in circle {circle_id}")]
    AlreadyInCircle { db_id: DbId, circle_id: CircleId },

    /// The member does not belong to the circle
    #[error("Member {db_id} is not in circle {circle_id}")]
    NotInCircle { db_id: DbId, circle_id: CircleId },

    /// A structural change was attempted while a traversal is in flight
    #[error("Cannot {operation} while {active} iteration(s) are active")]
    IterationInProgress {
        operation: &'static str,
        active: usize,
    },
}
