use crate::types::ReplicationId;

/// Receives notice that a replicated value changed and must be sent again
pub trait ScalarMutate: ScalarMutateClone + Send + Sync + 'static {
    /// Returns false if the change could not be queued
    fn mutate(&mut self, replication_id: ReplicationId) -> bool;
}

pub trait ScalarMutateClone {
    fn clone_box(&self) -> Box<dyn ScalarMutate>;
}

impl<T: 'static + Clone + ScalarMutate> ScalarMutateClone for T {
    fn clone_box(&self) -> Box<dyn ScalarMutate> {
        Box::new(self.clone())
    }
}

/// Observer handle installed on a [`ReplicatedScalar`](crate::ReplicatedScalar)
pub struct ScalarMutator {
    inner: Box<dyn ScalarMutate>,
}

impl ScalarMutator {
    pub fn new<M: ScalarMutate>(mutator: &M) -> Self {
        Self {
            inner: mutator.clone_box(),
        }
    }

    pub fn mutate(&mut self, replication_id: ReplicationId) -> bool {
        self.inner.mutate(replication_id)
    }
}

impl Clone for ScalarMutator {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}
