mod circle;
mod circle_manager;
mod community;
mod community_config;
mod error;
mod iteration;
mod member;
mod presence;

pub use circle::{CircleId, CommunityCircle};
pub use circle_manager::CircleManager;
pub use community::Community;
pub use community_config::CommunityConfig;
pub use error::CommunityError;
pub use iteration::{CircleIter, CircleWalk, MemberIter, MemberWalk};
pub use member::CommunityMember;
pub use presence::{AvatarSlot, CommunityBroadcast, PresenceSnapshot};
