mod pending_replication;
mod replicated_scalar;
mod scalar_mutate;

pub use pending_replication::PendingReplication;
pub use replicated_scalar::ReplicatedScalar;
pub use scalar_mutate::{ScalarMutate, ScalarMutator};
