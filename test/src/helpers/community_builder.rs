use stronghold_shared::{CircleId, Community, CommunityConfig, DbId};

/// Builds a community from (member, circle) pairs
pub struct CommunityBuilder {
    owner_db_id: DbId,
    config: CommunityConfig,
    entries: Vec<(DbId, String, CircleId)>,
}

impl CommunityBuilder {
    pub fn new(owner_db_id: u64) -> Self {
        Self {
            owner_db_id: DbId::new(owner_db_id),
            config: CommunityConfig::default(),
            entries: Vec::new(),
        }
    }

    pub fn persist_presence(mut self) -> Self {
        self.config.persist_presence = true;
        self
    }

    pub fn member(mut self, db_id: u64, circles: &[CircleId]) -> Self {
        let name = format!("Player{}", db_id);
        for circle_id in circles {
            self.entries.push((DbId::new(db_id), name.clone(), *circle_id));
        }
        self
    }

    pub fn build(self) -> Community {
        let mut community = Community::new(self.owner_db_id, self.config);
        for (db_id, name, circle_id) in self.entries {
            community
                .add_member(db_id, &name, circle_id)
                .expect("test community entries must be valid");
        }
        community
    }
}
