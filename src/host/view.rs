use super::container::InventoryId;
use super::entity::ViewerId;
use crate::constants::slots::{MAIN_STORAGE_START, PLAYER_STORAGE_SIZE};

/// Which inventory of a view a raw slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotZone {
    /// The opened container
    Top,
    /// The viewer's own inventory
    Bottom,
    /// Not part of any inventory, e.g. a click outside the window
    Outside,
}

/// The pairing of an opened container with the viewer's own inventory.
///
/// Raw slots number the top inventory first and the viewer's 36 storage
/// slots after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryView {
    pub viewer: ViewerId,
    pub top: InventoryId,
    pub top_size: usize,
}

impl InventoryView {
    pub fn new(viewer: ViewerId, top: InventoryId, top_size: usize) -> Self {
        Self { viewer, top, top_size }
    }

    /// Total number of raw slots in this view
    pub fn count_slots(&self) -> usize {
        self.top_size + PLAYER_STORAGE_SIZE
    }

    pub fn zone(&self, raw_slot: i32) -> SlotZone {
        if raw_slot < 0 {
            return SlotZone::Outside;
        }

        let raw_slot = raw_slot as usize;

        if raw_slot < self.top_size {
            SlotZone::Top
        } else if raw_slot < self.count_slots() {
            SlotZone::Bottom
        } else {
            SlotZone::Outside
        }
    }

    /// Convert a bottom raw slot into a player storage index.
    ///
    /// The view lists the three main rows before the hotbar, the storage puts
    /// the hotbar first.
    pub fn storage_index(&self, raw_slot: i32) -> Option<usize> {
        if self.zone(raw_slot) != SlotZone::Bottom {
            return None;
        }

        let local = raw_slot as usize - self.top_size;
        let main_rows = PLAYER_STORAGE_SIZE - MAIN_STORAGE_START;

        if local < main_rows {
            Some(local + MAIN_STORAGE_START)
        } else {
            Some(local - main_rows)
        }
    }
}
