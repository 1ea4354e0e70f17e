use log::warn;

use super::{CircleId, CommunityCircle};
use crate::archive::{Archive, ArchiveError, Transfer};

/// Owns the system circles of one community
#[derive(Debug, Clone, Default)]
pub struct CircleManager {
    circles: Vec<CommunityCircle>,
}

impl CircleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates every system circle that does not exist yet
    pub fn initialize(&mut self) {
        for id in CircleId::SYSTEM {
            if self.get_circle(id).is_none() {
                self.circles.push(CommunityCircle::new(id));
            }
        }
        self.circles.sort_by_key(|circle| circle.id());
    }

    pub fn shutdown(&mut self) {
        for circle in self.circles.iter_mut() {
            circle.clear();
        }
        self.circles.clear();
    }

    pub fn num_circles(&self) -> usize {
        self.circles.len()
    }

    pub fn get_circle(&self, id: CircleId) -> Option<&CommunityCircle> {
        self.circles.iter().find(|circle| circle.id() == id)
    }

    pub(crate) fn get_circle_mut(&mut self, id: CircleId) -> Option<&mut CommunityCircle> {
        self.circles.iter_mut().find(|circle| circle.id() == id)
    }

    pub fn get_circle_by_name(&self, name: &str) -> Option<&CommunityCircle> {
        self.circles.iter().find(|circle| circle.name() == name)
    }

    pub fn circles(&self) -> &[CommunityCircle] {
        &self.circles
    }

    pub(crate) fn circles_mut(&mut self) -> impl Iterator<Item = &mut CommunityCircle> {
        self.circles.iter_mut()
    }
}

impl Transfer for CircleManager {
    /// Writes the ids of the circles this archive may carry. Member lists are
    /// rebuilt from each member's own circle mask, so on decode the ids are
    /// only checked against the circles that exist.
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let purpose = archive.purpose();
        let mut ids: Vec<CircleId> = self
            .circles
            .iter()
            .map(|circle| circle.id())
            .filter(|id| id.should_archive_to(purpose))
            .collect();

        let mut success = true;
        let mut count = ids.len() as u32;
        success &= archive.transfer_count("num_circles", &mut count);

        if archive.is_decoding() {
            ids = vec![CircleId::Friends; count as usize];
        }

        for id in ids.iter_mut() {
            if !archive.transfer("circle_id", id) {
                success = false;
                continue;
            }
            if archive.is_decoding() && self.get_circle(*id).is_none() {
                warn!("CircleManager: decoded circle {} does not exist", id);
                success &= archive.record_failure(ArchiveError::FieldRejected {
                    field: "circle_id",
                    reason: format!("circle {} does not exist", id),
                });
            }
        }

        success
    }
}
