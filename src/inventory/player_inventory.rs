//! A viewer's own inventory: hotbar, main storage and off-hand

use super::item::{merge_into_slots, ItemStack};
use crate::constants::{HOTBAR_SIZE, PLAYER_STORAGE_SIZE};

/// Player's inventory
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInventory {
    /// Slots 0..9 are the hotbar, 9..36 the main storage
    slots: Vec<Option<ItemStack>>,
    off_hand: Option<ItemStack>,
    /// Number of times the off-hand was sent to the client
    off_hand_updates: u32,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    /// Create a new empty inventory
    pub fn new() -> Self {
        Self {
            slots: vec![None; PLAYER_STORAGE_SIZE],
            off_hand: None,
            off_hand_updates: 0,
        }
    }

    pub fn item(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Set a storage slot; out-of-range indices are ignored
    pub fn set_item(&mut self, index: usize, item: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = item;
        }
    }

    pub fn hotbar(&self) -> &[Option<ItemStack>] {
        &self.slots[..HOTBAR_SIZE]
    }

    /// Copy of all 36 storage slots
    pub fn storage_contents(&self) -> Vec<Option<ItemStack>> {
        self.slots.clone()
    }

    /// Replace the storage slots. Missing entries are cleared, extra entries dropped.
    pub fn set_storage_contents(&mut self, contents: Vec<Option<ItemStack>>) {
        let mut contents = contents;
        contents.resize(PLAYER_STORAGE_SIZE, None);
        self.slots = contents;
    }

    /// Try to add an item to the inventory, returns the leftover amount
    pub fn add_item(&mut self, item: &ItemStack) -> u32 {
        merge_into_slots(&mut self.slots, item)
    }

    /// Clear all storage slots. The off-hand is left alone.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn item_in_off_hand(&self) -> Option<&ItemStack> {
        self.off_hand.as_ref()
    }

    pub fn set_item_in_off_hand(&mut self, item: Option<ItemStack>) {
        self.off_hand = item;
        self.off_hand_updates += 1;
    }

    /// Send the current off-hand item to the client again
    pub fn refresh_off_hand(&mut self) {
        let item = self.off_hand.take();
        self.set_item_in_off_hand(item);
    }

    pub fn off_hand_updates(&self) -> u32 {
        self.off_hand_updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemId;

    #[test]
    fn test_add_item_fills_hotbar_first() {
        let mut inventory = PlayerInventory::new();
        let leftover = inventory.add_item(&ItemStack::new(ItemId(3), 70));

        assert_eq!(leftover, 0);
        assert_eq!(inventory.item(0).map(|s| s.count), Some(64));
        assert_eq!(inventory.item(1).map(|s| s.count), Some(6));
    }

    #[test]
    fn test_set_storage_contents_pads() {
        let mut inventory = PlayerInventory::new();
        inventory.set_storage_contents(vec![Some(ItemStack::single(ItemId(1)))]);

        assert_eq!(inventory.storage_contents().len(), PLAYER_STORAGE_SIZE);
        assert!(inventory.item(0).is_some());
        assert!(inventory.item(35).is_none());
    }

    #[test]
    fn test_refresh_off_hand_keeps_item() {
        let mut inventory = PlayerInventory::new();
        inventory.set_item_in_off_hand(Some(ItemStack::single(ItemId(9))));
        inventory.refresh_off_hand();

        assert_eq!(inventory.item_in_off_hand().map(|s| s.item_id), Some(ItemId(9)));
        assert_eq!(inventory.off_hand_updates(), 2);
    }

    #[test]
    fn test_clear_keeps_off_hand() {
        let mut inventory = PlayerInventory::new();
        inventory.add_item(&ItemStack::new(ItemId(1), 5));
        inventory.set_item_in_off_hand(Some(ItemStack::single(ItemId(2))));
        inventory.clear();

        assert!(inventory.is_empty());
        assert!(inventory.item_in_off_hand().is_some());
    }
}
