use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use super::{
    options::truncate_display_name, StashConfig, StashTabError, StashTabOptions,
    StashTabOptionsUpdate,
};
use crate::{
    archive::{Archive, Transfer},
    types::PrototypeId,
};

/// Presentation options of every stash tab a player has customized or placed.
///
/// At every stable state the `sort_order` values form the dense permutation
/// `0..len()`, one tab per value.
#[derive(Debug, Clone, Default)]
pub struct StashTabs {
    config: StashConfig,
    options: BTreeMap<PrototypeId, StashTabOptions>,
}

impl StashTabs {
    pub fn new(config: StashConfig) -> Self {
        Self {
            config,
            options: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self, tab_id: PrototypeId) -> Option<&StashTabOptions> {
        self.options.get(&tab_id)
    }

    pub fn contains(&self, tab_id: PrototypeId) -> bool {
        self.options.contains_key(&tab_id)
    }

    /// Tab ids ordered by their sort order
    pub fn tabs_in_order(&self) -> Vec<PrototypeId> {
        let mut tabs: Vec<(u32, PrototypeId)> = self
            .options
            .iter()
            .map(|(tab_id, options)| (options.sort_order, *tab_id))
            .collect();
        tabs.sort();
        tabs.into_iter().map(|(_, tab_id)| tab_id).collect()
    }

    /// True if the sort orders are exactly `0..len()`
    pub fn is_dense_permutation(&self) -> bool {
        let orders: BTreeSet<u32> = self
            .options
            .values()
            .map(|options| options.sort_order)
            .collect();
        orders.len() == self.options.len()
            && orders
                .iter()
                .enumerate()
                .all(|(index, order)| index as u32 == *order)
    }

    /// Moves a tab to `new_position`, creating its options if needed, and
    /// shifts the tabs in between to keep the order dense.
    pub fn insert(&mut self, tab_id: PrototypeId, new_position: i32) -> Result<(), StashTabError> {
        if new_position < 0 {
            warn!(
                "StashTabs::insert(): negative position {} for {}",
                new_position, tab_id
            );
            return Err(StashTabError::NegativePosition {
                tab_id,
                position: new_position,
            });
        }
        if !tab_id.is_valid() {
            warn!("StashTabs::insert(): invalid tab id {}", tab_id);
            return Err(StashTabError::InvalidTabId { tab_id });
        }

        let new_order = new_position as u32;
        let old_order = self.options.get(&tab_id).map(|options| options.sort_order);

        // re-inserting a placed tab at its own slot is refused; a tab created
        // by this call may take any slot, including the default one
        if old_order == Some(new_order) {
            warn!(
                "StashTabs::insert(): {} is already at position {}",
                tab_id, new_order
            );
            return Err(StashTabError::AlreadyAtPosition {
                tab_id,
                position: new_order,
            });
        }

        self.options.entry(tab_id).or_default();

        if self.options.len() < 2 {
            return Ok(());
        }

        // Orders in [start, finish] move by `increment`. A new tab pushes
        // every order at or after its slot forward.
        let (start, finish, increment): (u32, u32, i64) = match old_order {
            None => (new_order, u32::MAX, 1),
            Some(old_order) if new_order > old_order => (old_order + 1, new_order, -1),
            Some(old_order) => (new_order, old_order - 1, 1),
        };

        let count = self.options.len();
        let mut by_order: BTreeMap<u32, PrototypeId> = BTreeMap::new();
        let mut overflow = new_order as usize >= count;
        by_order.insert(new_order, tab_id);

        for (other_id, other) in self.options.iter_mut() {
            if *other_id == tab_id {
                other.sort_order = new_order;
                continue;
            }

            if (start..=finish).contains(&other.sort_order) {
                match u32::try_from(other.sort_order as i64 + increment) {
                    Ok(shifted) => other.sort_order = shifted,
                    Err(_) => overflow = true,
                }
            }

            overflow |= other.sort_order as usize >= count;
            overflow |= by_order.insert(other.sort_order, *other_id).is_some();
        }

        if overflow {
            self.recompact(Some(tab_id));
        }
        Ok(())
    }

    /// Removes a tab's options and closes the gap it leaves
    pub fn remove(&mut self, tab_id: PrototypeId) -> Result<StashTabOptions, StashTabError> {
        let Some(removed) = self.options.remove(&tab_id) else {
            warn!("StashTabs::remove(): {} not found", tab_id);
            return Err(StashTabError::TabNotFound { tab_id });
        };

        for options in self.options.values_mut() {
            if options.sort_order > removed.sort_order {
                options.sort_order -= 1;
            }
        }
        if !self.is_dense_permutation() {
            self.recompact(None);
        }
        Ok(removed)
    }

    /// Applies the fields present in `update`. A tab without options is
    /// appended after every existing tab.
    pub fn update_options(&mut self, update: &StashTabOptionsUpdate) -> Result<(), StashTabError> {
        let tab_id = update.tab_id;
        if !tab_id.is_valid() {
            warn!("StashTabs::update_options(): invalid tab id {}", tab_id);
            return Err(StashTabError::InvalidTabId { tab_id });
        }

        let next_order = self.options.len() as u32;
        let max_chars = self.config.max_display_name_chars;
        let options = self.options.entry(tab_id).or_insert_with(|| StashTabOptions {
            sort_order: next_order,
            ..Default::default()
        });

        if let Some(display_name) = &update.display_name {
            options.display_name = truncate_display_name(display_name, max_chars);
        }
        if let Some(icon_asset_id) = update.icon_asset_id {
            options.icon_asset_id = icon_asset_id;
        }
        if let Some(color) = update.color {
            options.color = color;
        }
        Ok(())
    }

    /// Reassigns `0..len()` by ascending current order. `preferred` wins ties.
    fn recompact(&mut self, preferred: Option<PrototypeId>) {
        let mut ordered: Vec<(u32, bool, PrototypeId)> = self
            .options
            .iter()
            .map(|(tab_id, options)| (options.sort_order, Some(*tab_id) != preferred, *tab_id))
            .collect();
        ordered.sort();

        debug!("StashTabs: recompacting {} tab(s)", ordered.len());
        for (index, (_, _, tab_id)) in ordered.into_iter().enumerate() {
            if let Some(options) = self.options.get_mut(&tab_id) {
                options.sort_order = index as u32;
            }
        }
    }
}

impl Transfer for StashTabs {
    fn transfer(&mut self, archive: &mut Archive) -> bool {
        let mut success = true;

        let mut num_tabs = self.options.len() as u32;
        success &= archive.transfer_count("num_stash_tabs", &mut num_tabs);

        if archive.is_encoding() {
            for (tab_id, options) in self.options.iter_mut() {
                let mut tab_id = *tab_id;
                success &= archive.transfer("tab_id", &mut tab_id);
                success &= transfer_options(archive, options);
            }
            return success;
        }

        // decoded into a scratch table, swapped in only if every record read
        let mut decoded = BTreeMap::new();
        let mut records_ok = success;
        for _ in 0..num_tabs {
            let mut tab_id = PrototypeId::INVALID;
            let mut options = StashTabOptions::default();
            records_ok &= archive.transfer("tab_id", &mut tab_id);
            records_ok &= transfer_options(archive, &mut options);

            let max_chars = self.config.max_display_name_chars;
            if options.display_name.chars().count() > max_chars {
                warn!(
                    "StashTabs: decoded name of {} exceeds {} characters",
                    tab_id, max_chars
                );
                options.display_name = truncate_display_name(&options.display_name, max_chars);
            }
            if !tab_id.is_valid() {
                warn!("StashTabs: dropping decoded options without a tab id");
                continue;
            }
            decoded.insert(tab_id, options);
        }

        if !records_ok {
            warn!(
                "StashTabs: decode incomplete, keeping the {} existing tab(s)",
                self.options.len()
            );
            return false;
        }

        self.options = decoded;
        if !self.is_dense_permutation() {
            warn!("StashTabs: decoded sort orders are not dense, recompacting");
            self.recompact(None);
        }
        true
    }
}

fn transfer_options(archive: &mut Archive, options: &mut StashTabOptions) -> bool {
    let mut success = true;
    success &= archive.transfer("display_name", &mut options.display_name);
    success &= archive.transfer("icon_asset_id", &mut options.icon_asset_id);
    success &= archive.transfer("color", &mut options.color);
    success &= archive.transfer("sort_order", &mut options.sort_order);
    success
}
