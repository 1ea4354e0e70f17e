//! # Stronghold Shared
//! Replicated player state shared by stronghold server processes.
//!
//! * [`Archive`] is the ordered transfer contract used for durable-storage
//!   snapshots, live replication frames and cross-process migration alike.
//! * [`ReplicatedScalar`] is the smallest replicated unit.
//! * [`Community`] caches the social graph of one player.
//! * [`StashTabs`] keeps the user-chosen order of stash tabs dense.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use stronghold_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
    SerdeIntegerConversion, SignedInteger, SignedVariableInteger, UnsignedInteger,
    UnsignedVariableInteger,
};

mod archive;
mod community;
mod replication;
mod stash;
mod types;

pub use archive::{
    decode_into, encode_to_vec, Archive, ArchiveConfig, ArchiveError, ArchiveMode,
    ArchivePurpose, ReplicationPolicy, Transfer,
};
pub use community::{
    AvatarSlot, CircleId, CircleIter, CircleManager, CircleWalk, Community, CommunityBroadcast,
    CommunityCircle, CommunityConfig, CommunityError, CommunityMember, MemberIter, MemberWalk,
    PresenceSnapshot,
};
pub use replication::{PendingReplication, ReplicatedScalar, ScalarMutate, ScalarMutator};
pub use stash::{
    StashConfig, StashTabColor, StashTabError, StashTabOptions, StashTabOptionsUpdate, StashTabs,
};
pub use types::{AssetId, DbId, PrototypeId, ReplicationId};
