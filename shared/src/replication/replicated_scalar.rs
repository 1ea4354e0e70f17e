use std::ops::Deref;

use log::warn;

use stronghold_serde::Serde;

use super::ScalarMutator;
use crate::{
    archive::{Archive, Transfer},
    types::ReplicationId,
};

/// A single replicated value. Writes go through [`ReplicatedScalar::set`], which
/// bumps the version and tells the installed mutator which channel changed.
///
/// The replication id names the channel, not the value: two scalars with
/// different ids but equal values compare equal.
#[derive(Clone)]
pub struct ReplicatedScalar<T: Serde> {
    replication_id: ReplicationId,
    value: T,
    version: u32,
    mutator: Option<ScalarMutator>,
}

impl<T: Serde> ReplicatedScalar<T> {
    pub fn new(replication_id: ReplicationId, value: T) -> Self {
        Self {
            replication_id,
            value,
            version: 0,
            mutator: None,
        }
    }

    pub fn replication_id(&self) -> ReplicationId {
        self.replication_id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Install the observer notified on every change
    pub fn set_mutator(&mut self, mutator: &ScalarMutator) {
        self.mutator = Some(mutator.clone());
    }

    /// Replace the value. Returns true if it differed from the previous one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }

        self.value = value;
        self.version = self.version.wrapping_add(1);
        self.notify();
        true
    }

    fn notify(&mut self) {
        if let Some(mutator) = &mut self.mutator {
            if !mutator.mutate(self.replication_id) {
                warn!(
                    "ReplicatedScalar {} changed but the change could not be queued",
                    self.replication_id
                );
            }
        }
    }
}

impl<T: Serde> Transfer for ReplicatedScalar<T> {
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let mut success = true;
        if archive.is_replication() {
            success &= archive.transfer_varint("replication_id", &mut self.replication_id);
        }

        if archive.is_decoding() {
            let mut incoming = self.value.clone();
            success &= archive.transfer("value", &mut incoming);
            self.set(incoming);
        } else {
            success &= archive.transfer("value", &mut self.value);
        }
        success
    }
}

impl<T: Serde> Deref for ReplicatedScalar<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Serde> PartialEq for ReplicatedScalar<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Serde + std::fmt::Debug> std::fmt::Debug for ReplicatedScalar<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicatedScalar")
            .field("replication_id", &self.replication_id)
            .field("value", &self.value)
            .field("version", &self.version)
            .finish()
    }
}
