use std::sync::{Arc, Mutex};

use log::warn;

use super::ScalarMutate;
use crate::types::ReplicationId;

/// Shared queue of replication channels whose values changed since the last
/// drain. Every clone appends to the same queue.
#[derive(Clone, Default)]
pub struct PendingReplication {
    queue: Arc<Mutex<Vec<ReplicationId>>>,
}

impl PendingReplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued replication id, oldest first, without duplicates
    pub fn drain(&self) -> Vec<ReplicationId> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => {
                warn!("PendingReplication queue lock poisoned, dropping queued changes");
                Vec::new()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().map(|queue| queue.is_empty()).unwrap_or(true)
    }
}

impl ScalarMutate for PendingReplication {
    fn mutate(&mut self, replication_id: ReplicationId) -> bool {
        let Ok(mut queue) = self.queue.lock() else {
            warn!("PendingReplication queue lock poisoned, change to {} lost", replication_id);
            return false;
        };
        if !queue.contains(&replication_id) {
            queue.push(replication_id);
        }
        true
    }
}
