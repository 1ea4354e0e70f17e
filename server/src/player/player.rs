use std::vec::IntoIter;

use log::{debug, info, warn};

use stronghold_shared::{
    Archive, ArchivePurpose, CircleId, Community, CommunityBroadcast, DbId, PendingReplication,
    PrototypeId, ReplicatedScalar, ReplicationId, ScalarMutator, StashTabOptionsUpdate, StashTabs,
    Transfer,
};

use super::PlayerInfo;
use crate::{
    events::{PlayerEvent, PlayerEvents},
    inventory::InventoryOracle,
    messages::{CommunityBroadcastBatch, InboundMessage, StashTabInsertRequest},
    PlayerError, ServerConfig,
};

/// Server-side owner of one player's replicated state
pub struct Player {
    db_id: DbId,
    name: ReplicatedScalar<String>,
    has_console_ui: ReplicatedScalar<bool>,
    community: Community,
    stash_tabs: StashTabs,
    stash_inventories: Vec<PrototypeId>,
    inventory: Box<dyn InventoryOracle>,
    pending_replication: PendingReplication,
    events: PlayerEvents,
    config: ServerConfig,
}

impl Player {
    /// The name takes `first_replication_id` and the console flag the id
    /// after it, so both ids must fit in a `ReplicationId`.
    pub fn new(
        info: PlayerInfo,
        inventory: Box<dyn InventoryOracle>,
        config: ServerConfig,
    ) -> Result<Self, PlayerError> {
        let Some(console_ui_id) = info.first_replication_id.checked_add(1) else {
            warn!(
                "Player::new(): no replication ids left after {} for {}",
                info.first_replication_id, info.db_id
            );
            return Err(PlayerError::ReplicationIdsExhausted {
                first_replication_id: info.first_replication_id,
            });
        };

        let pending_replication = PendingReplication::new();
        let mutator = ScalarMutator::new(&pending_replication);

        let mut name = ReplicatedScalar::new(info.first_replication_id, info.name);
        name.set_mutator(&mutator);
        let mut has_console_ui = ReplicatedScalar::new(console_ui_id, false);
        has_console_ui.set_mutator(&mutator);

        Ok(Self {
            db_id: info.db_id,
            name,
            has_console_ui,
            community: Community::new(info.db_id, config.community.clone()),
            stash_tabs: StashTabs::new(config.stash.clone()),
            stash_inventories: info.stash_inventories,
            inventory,
            pending_replication,
            events: PlayerEvents::new(),
            config,
        })
    }

    pub fn db_id(&self) -> DbId {
        self.db_id
    }

    pub fn name(&self) -> &str {
        self.name.get()
    }

    /// Renames the player. Returns false if the name did not change.
    pub fn set_name(&mut self, name: String) -> bool {
        self.name.set(name)
    }

    pub fn has_console_ui(&self) -> bool {
        *self.has_console_ui.get()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // Stash tabs

    pub fn stash_tabs(&self) -> &StashTabs {
        &self.stash_tabs
    }

    /// Stash inventories of this player in declared order. `locked` and
    /// `unlocked` select which of them are returned.
    pub fn get_stash_tabs(&self, locked: bool, unlocked: bool) -> Vec<PrototypeId> {
        self.stash_inventories
            .iter()
            .copied()
            .filter(|tab_id| {
                if self.inventory.has_inventory(*tab_id) {
                    unlocked
                } else {
                    locked
                }
            })
            .collect()
    }

    /// Moves an unlocked stash tab to `position`, creating its options if needed
    pub fn stash_tab_insert(&mut self, tab_id: PrototypeId, position: i32) -> Result<(), PlayerError> {
        self.check_unlocked_stash(tab_id)?;
        self.stash_tabs.insert(tab_id, position)?;
        self.events.push(PlayerEvent::StashTabsReordered);
        Ok(())
    }

    pub fn update_stash_tab_options(
        &mut self,
        update: &StashTabOptionsUpdate,
    ) -> Result<(), PlayerError> {
        self.check_unlocked_stash(update.tab_id)?;
        self.stash_tabs.update_options(update)?;
        self.events.push(PlayerEvent::StashTabOptionsChanged {
            tab_id: update.tab_id,
        });
        Ok(())
    }

    /// Creates the stash inventory and places its tab after every existing one
    pub fn unlock_stash_tab(&mut self, tab_id: PrototypeId) -> Result<(), PlayerError> {
        self.check_declared_stash(tab_id)?;

        if self.inventory.has_inventory(tab_id) {
            debug!("Player {}: stash tab {} already unlocked", self.db_id, tab_id);
            return Ok(());
        }

        if !self.inventory.add_inventory(tab_id) {
            warn!(
                "Player {}: inventory system refused to unlock stash tab {}",
                self.db_id, tab_id
            );
            return Err(PlayerError::InventoryRejected { tab_id });
        }

        if !self.stash_tabs.contains(tab_id) {
            self.stash_tabs.update_options(&StashTabOptionsUpdate {
                tab_id,
                ..Default::default()
            })?;
        }

        info!("Player {}: unlocked stash tab {}", self.db_id, tab_id);
        self.events.push(PlayerEvent::StashTabUnlocked { tab_id });
        Ok(())
    }

    fn check_declared_stash(&self, tab_id: PrototypeId) -> Result<(), PlayerError> {
        if self.stash_inventories.contains(&tab_id) {
            return Ok(());
        }
        warn!("Player {}: {} is not one of its stash inventories", self.db_id, tab_id);
        Err(PlayerError::UnknownStashInventory { tab_id })
    }

    fn check_unlocked_stash(&self, tab_id: PrototypeId) -> Result<(), PlayerError> {
        self.check_declared_stash(tab_id)?;
        if self.inventory.has_inventory(tab_id) {
            return Ok(());
        }
        warn!("Player {}: stash tab {} is locked", self.db_id, tab_id);
        Err(PlayerError::StashTabLocked { tab_id })
    }

    // Community

    pub fn community(&self) -> &Community {
        &self.community
    }

    pub fn add_community_member(
        &mut self,
        db_id: DbId,
        name: &str,
        circle_id: CircleId,
    ) -> Result<(), PlayerError> {
        self.community.add_member(db_id, name, circle_id)?;
        self.events.push(PlayerEvent::MemberAdded { db_id, circle_id });
        Ok(())
    }

    pub fn remove_community_member(
        &mut self,
        db_id: DbId,
        circle_id: CircleId,
    ) -> Result<(), PlayerError> {
        self.community.remove_member(db_id, circle_id)?;
        self.events.push(PlayerEvent::MemberRemoved { db_id, circle_id });
        Ok(())
    }

    pub fn receive_broadcast(&mut self, broadcast: &CommunityBroadcast) -> Result<(), PlayerError> {
        self.community.receive_broadcast(broadcast)?;
        self.events.push(PlayerEvent::MemberPresenceUpdated {
            db_id: broadcast.member_db_id,
        });
        Ok(())
    }

    /// Releases the community. Fails while a traversal is in progress.
    pub fn shutdown(&mut self) -> Result<(), PlayerError> {
        self.community.shutdown()?;
        Ok(())
    }

    // Messages

    /// Reads and handles one tagged inbound message
    pub fn receive_message(&mut self, bytes: &[u8]) -> Result<(), PlayerError> {
        let message = InboundMessage::read(bytes).map_err(|source| {
            warn!("Player {}: dropping malformed message: {}", self.db_id, source);
            PlayerError::MalformedMessage { source }
        })?;
        self.handle_message(message)
    }

    pub fn handle_message(&mut self, message: InboundMessage) -> Result<(), PlayerError> {
        debug!("Player {}: handling {}", self.db_id, message.name());
        match message {
            InboundMessage::StashTabInsert(StashTabInsertRequest { tab_id, position }) => {
                self.stash_tab_insert(tab_id, position)
            }
            InboundMessage::StashTabOptions(update) => self.update_stash_tab_options(&update),
            InboundMessage::CommunityBroadcasts(batch) => {
                self.handle_broadcasts(batch);
                Ok(())
            }
        }
    }

    // broadcasts for players no longer in the community are routine
    fn handle_broadcasts(&mut self, batch: CommunityBroadcastBatch) {
        for broadcast in &batch.broadcasts {
            if let Err(err) = self.receive_broadcast(broadcast) {
                debug!("Player {}: skipped broadcast: {}", self.db_id, err);
            }
        }
    }

    // Replication

    /// Replication ids of scalars changed since the last call
    pub fn take_pending_replication(&mut self) -> Vec<ReplicationId> {
        self.pending_replication.drain()
    }

    /// Changes to report to the owning client, oldest first
    pub fn take_events(&mut self) -> IntoIter<PlayerEvent> {
        self.events.take()
    }

    pub fn encode(&mut self, purpose: ArchivePurpose) -> Result<Vec<u8>, PlayerError> {
        let mut archive = Archive::encoder(purpose).with_config(self.config.archive.clone());
        self.transfer(&mut archive);
        Ok(archive.finish_encode()?)
    }

    /// Loads `bytes` over the current state. The decoded state becomes the new
    /// replication baseline, so nothing it changed is left pending.
    pub fn decode(&mut self, bytes: &[u8], purpose: ArchivePurpose) -> Result<(), PlayerError> {
        let mut archive = Archive::decoder(bytes, purpose).with_config(self.config.archive.clone());
        self.transfer(&mut archive);
        self.pending_replication.drain();
        archive.finish_decode()?;
        Ok(())
    }
}

impl Transfer for Player {
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let mut success = true;
        success &= archive.transfer_nested(&mut self.name);
        success &= archive.transfer_nested(&mut self.has_console_ui);
        if archive.is_decoding() && self.has_console_ui() {
            warn!("Player {}: decoded a console UI flag that should never be set", self.db_id);
        }

        let owner_state = archive.purpose().includes_owner_state();

        let mut has_stash_tabs = owner_state;
        success &= archive.transfer_flag("has_stash_tabs", &mut has_stash_tabs);
        if has_stash_tabs {
            success &= archive.transfer_nested(&mut self.stash_tabs);
        }

        let mut has_community = owner_state;
        success &= archive.transfer_flag("has_community", &mut has_community);
        if has_community {
            success &= archive.transfer_nested(&mut self.community);
        }

        success
    }
}
