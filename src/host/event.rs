//! Inventory events as the host reports them

use super::container::InventoryId;
use super::entity::ViewerId;
use super::view::{InventoryView, SlotZone};
use crate::inventory::ItemStack;
use std::collections::BTreeMap;

/// How the viewer clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickType {
    Left,
    ShiftLeft,
    Right,
    ShiftRight,
    WindowBorderLeft,
    WindowBorderRight,
    Middle,
    NumberKey,
    DoubleClick,
    Drop,
    ControlDrop,
    Creative,
    SwapOffhand,
    Unknown,
}

impl ClickType {
    #[must_use]
    pub fn is_keyboard_click(&self) -> bool {
        matches!(self, Self::NumberKey | Self::Drop | Self::ControlDrop | Self::SwapOffhand)
    }

    #[must_use]
    pub fn is_right_click(&self) -> bool {
        matches!(self, Self::Right | Self::ShiftRight)
    }

    #[must_use]
    pub fn is_left_click(&self) -> bool {
        matches!(self, Self::Left | Self::ShiftLeft | Self::DoubleClick | Self::Creative)
    }

    #[must_use]
    pub fn is_shift_click(&self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }
}

/// What the click would do to the items involved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryAction {
    Nothing,
    PickupAll,
    PickupSome,
    PickupHalf,
    PickupOne,
    PlaceAll,
    PlaceSome,
    PlaceOne,
    SwapWithCursor,
    DropAllCursor,
    DropOneCursor,
    DropAllSlot,
    DropOneSlot,
    MoveToOtherInventory,
    HotbarSwap,
    CloneStack,
    CollectToCursor,
    Unknown,
}

/// How the cursor stack was spread over the dragged slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragType {
    /// One item per slot (right mouse button)
    Single,
    /// Evenly split over the slots (left mouse button)
    Even,
}

#[derive(Debug, Clone)]
pub struct InventoryClickEvent {
    pub view: InventoryView,
    pub raw_slot: i32,
    pub click: ClickType,
    pub action: InventoryAction,
    /// Item in the clicked slot, or the owning gui item once a pane claims the click
    pub current_item: Option<ItemStack>,
    cancelled: bool,
}

impl InventoryClickEvent {
    pub fn new(view: InventoryView, raw_slot: i32, click: ClickType, action: InventoryAction) -> Self {
        Self {
            view,
            raw_slot,
            click,
            action,
            current_item: None,
            cancelled: false,
        }
    }

    pub fn viewer(&self) -> ViewerId {
        self.view.viewer
    }

    pub fn zone(&self) -> SlotZone {
        self.view.zone(self.raw_slot)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[derive(Debug, Clone)]
pub struct InventoryDragEvent {
    pub view: InventoryView,
    /// Raw slots touched by the drag with the stack each would receive
    pub new_items: BTreeMap<i32, ItemStack>,
    pub drag_type: DragType,
    /// Cursor before the drag started
    pub old_cursor: Option<ItemStack>,
    cancelled: bool,
}

impl InventoryDragEvent {
    pub fn new(
        view: InventoryView,
        new_items: BTreeMap<i32, ItemStack>,
        drag_type: DragType,
        old_cursor: Option<ItemStack>,
    ) -> Self {
        Self {
            view,
            new_items,
            drag_type,
            old_cursor,
            cancelled: false,
        }
    }

    pub fn viewer(&self) -> ViewerId {
        self.view.viewer
    }

    pub fn raw_slots(&self) -> impl Iterator<Item = i32> + '_ {
        self.new_items.keys().copied()
    }

    pub fn touches(&self, zone: SlotZone) -> bool {
        self.raw_slots().any(|slot| self.view.zone(slot) == zone)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryOpenEvent {
    pub viewer: ViewerId,
    pub inventory: InventoryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCloseEvent {
    pub viewer: ViewerId,
    pub inventory: InventoryId,
}

/// An entity picking up an item from the ground
#[derive(Debug, Clone)]
pub struct EntityPickupItemEvent {
    pub entity: ViewerId,
    /// The ground item. Shrunk to whatever was not picked up.
    pub item: ItemStack,
    /// Whether the ground item was removed from the world
    pub item_removed: bool,
    cancelled: bool,
}

impl EntityPickupItemEvent {
    pub fn new(entity: ViewerId, item: ItemStack) -> Self {
        Self {
            entity,
            item,
            item_removed: false,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A viewer selecting a trade in a merchant screen
#[derive(Debug, Clone)]
pub struct TradeSelectEvent {
    pub view: InventoryView,
    pub index: usize,
    cancelled: bool,
}

impl TradeSelectEvent {
    pub fn new(view: InventoryView, index: usize) -> Self {
        Self {
            view,
            index,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Lifecycle events the host queues for the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Open(InventoryOpenEvent),
    Close(InventoryCloseEvent),
}
