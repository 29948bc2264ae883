use schema::Item;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::RosterError;
use crate::spectra::Spectra;

/// The number of creatures the player can carry.
pub const PARTY_SIZE: usize = 10;

/// The number of distinct item stacks the player can carry.
pub const INVENTORY_SIZE: usize = 24;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub item: Item,
    pub count: u16,
}

/// The player's persistent roster: party, inventory and money.
///
/// The first three occupied party slots are the ones sent into battle.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Player {
    pub name: String,
    pub party: Vec<Spectra>,
    pub inventory: Vec<ItemStack>,
    pub money: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_party_space(&self) -> bool {
        self.party.len() < PARTY_SIZE
    }

    /// Adds a creature to the end of the party if there is room.
    pub fn add_spectra(&mut self, spectra: Spectra) -> Result<usize, RosterError> {
        if !self.has_party_space() {
            return Err(RosterError::PartyFull);
        }
        debug!(species = ?spectra.species, level = spectra.level, "added to party");
        self.party.push(spectra);
        Ok(self.party.len() - 1)
    }

    /// Adds `count` units of an item, stacking onto an existing entry.
    pub fn add_item(&mut self, item: Item, count: u16) -> Result<(), RosterError> {
        if let Some(stack) = self.inventory.iter_mut().find(|stack| stack.item == item) {
            stack.count = stack.count.saturating_add(count);
            return Ok(());
        }
        if self.inventory.len() >= INVENTORY_SIZE {
            return Err(RosterError::InventoryFull);
        }
        self.inventory.push(ItemStack { item, count });
        Ok(())
    }

    /// Removes one unit of the item in `slot`, dropping the stack when it
    /// runs out.
    pub fn consume_item(&mut self, slot: usize) -> Result<Item, RosterError> {
        let stack = self
            .inventory
            .get_mut(slot)
            .ok_or(RosterError::NoSuchItem(slot))?;
        let item = stack.item;
        stack.count = stack.count.saturating_sub(1);
        if stack.count == 0 {
            self.inventory.remove(slot);
        }
        Ok(item)
    }
}
