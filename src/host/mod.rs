/// Host Server Model
///
/// The toolkit is embedded in a game server. This module models the pieces of
/// that server the toolkit talks to: human entities with their own
/// inventories, container inventories, a deferred task queue and the
/// open/close lifecycle events the server emits. Embedders mirror their server
/// state into a `Host`; tests drive it directly.

pub mod container;
pub mod entity;
pub mod event;
pub mod view;

pub use container::{Inventory, InventoryId, InventoryType, MerchantOffer, OfferCost};
pub use entity::{HumanEntity, MerchantOffers, ViewerId};
pub use event::{
    ClickType, DragType, EntityPickupItemEvent, HostEvent, InventoryAction, InventoryClickEvent,
    InventoryCloseEvent, InventoryDragEvent, InventoryOpenEvent, TradeSelectEvent,
};
pub use view::{InventoryView, SlotZone};

use crate::error::{GuiError, GuiResult};
use crate::gui::GuiHandle;
use crate::inventory::ItemStack;
use crate::scheduler::{Scheduler, TaskTarget};
use crate::version::Version;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug)]
pub struct Host {
    version: Version,
    entities: FxHashMap<ViewerId, HumanEntity>,
    inventories: FxHashMap<InventoryId, Inventory>,
    events: VecDeque<HostEvent>,
    next_entity_id: u64,
    next_inventory_id: u64,
    pub scheduler: Scheduler,
}

impl Host {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            entities: FxHashMap::default(),
            inventories: FxHashMap::default(),
            events: VecDeque::new(),
            next_entity_id: 1,
            next_inventory_id: 1,
            scheduler: Scheduler::new(),
        }
    }

    /// Version the host is running
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn spawn_player(&mut self, name: impl Into<String>) -> ViewerId {
        self.spawn_entity(name, true)
    }

    pub fn spawn_entity(&mut self, name: impl Into<String>, is_player: bool) -> ViewerId {
        let id = ViewerId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(id, HumanEntity::new(id, name, is_player));
        id
    }

    /// Remove an entity without emitting a close event
    pub fn remove_entity(&mut self, id: ViewerId) -> Option<HumanEntity> {
        let entity = self.entities.remove(&id)?;

        if let Some(open) = entity.open_inventory {
            if let Some(inventory) = self.inventories.get_mut(&open) {
                inventory.viewers.remove(&id);
            }
        }

        Some(entity)
    }

    pub fn entity(&self, id: ViewerId) -> Option<&HumanEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: ViewerId) -> Option<&mut HumanEntity> {
        self.entities.get_mut(&id)
    }

    pub fn entity_or_err(&mut self, id: ViewerId) -> GuiResult<&mut HumanEntity> {
        self.entities.get_mut(&id).ok_or(GuiError::ViewerNotFound(id))
    }

    pub fn create_inventory(
        &mut self,
        kind: InventoryType,
        size: usize,
        title: impl Into<String>,
        holder: Option<GuiHandle>,
    ) -> InventoryId {
        let id = InventoryId(self.next_inventory_id);
        self.next_inventory_id += 1;
        self.inventories.insert(id, Inventory::new(id, kind, size, title, holder));
        id
    }

    pub fn inventory(&self, id: InventoryId) -> Option<&Inventory> {
        self.inventories.get(&id)
    }

    pub fn inventory_mut(&mut self, id: InventoryId) -> Option<&mut Inventory> {
        self.inventories.get_mut(&id)
    }

    pub fn inventory_or_err(&mut self, id: InventoryId) -> GuiResult<&mut Inventory> {
        self.inventories.get_mut(&id).ok_or(GuiError::InventoryNotFound(id))
    }

    /// Drop an inventory nobody is viewing. Inventories with viewers are kept.
    pub fn remove_inventory(&mut self, id: InventoryId) -> Option<Inventory> {
        match self.inventories.get(&id) {
            Some(inventory) if inventory.viewers.is_empty() => self.inventories.remove(&id),
            _ => None,
        }
    }

    /// Gui owning an inventory
    pub fn holder(&self, id: InventoryId) -> Option<GuiHandle> {
        self.inventories.get(&id).and_then(|inventory| inventory.holder.clone())
    }

    /// Viewers of an inventory, in id order
    pub fn viewers(&self, id: InventoryId) -> Vec<ViewerId> {
        self.inventories
            .get(&id)
            .map(|inventory| inventory.viewers.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Open `inventory` for `viewer`, closing whatever the viewer had open
    pub fn open_inventory(&mut self, viewer: ViewerId, inventory: InventoryId) -> GuiResult<()> {
        if !self.inventories.contains_key(&inventory) {
            return Err(GuiError::InventoryNotFound(inventory));
        }

        let current = self.entity_or_err(viewer)?.open_inventory;

        if current.is_some() {
            self.close_inventory(viewer)?;
        }

        self.inventory_or_err(inventory)?.viewers.insert(viewer);
        self.entity_or_err(viewer)?.open_inventory = Some(inventory);
        self.events
            .push_back(HostEvent::Open(InventoryOpenEvent { viewer, inventory }));

        log::debug!("[Host::open_inventory] {} opened {}", viewer, inventory);
        Ok(())
    }

    /// Close the viewer's open inventory. No-op when nothing is open.
    pub fn close_inventory(&mut self, viewer: ViewerId) -> GuiResult<()> {
        let entity = self.entity_or_err(viewer)?;

        let Some(inventory) = entity.open_inventory.take() else {
            return Ok(());
        };

        entity.merchant_offers = None;

        if let Some(open) = self.inventories.get_mut(&inventory) {
            open.viewers.remove(&viewer);
        }

        self.events
            .push_back(HostEvent::Close(InventoryCloseEvent { viewer, inventory }));

        log::debug!("[Host::close_inventory] {} closed {}", viewer, inventory);
        Ok(())
    }

    /// The viewer's current view, if a container is open
    pub fn view(&self, viewer: ViewerId) -> Option<InventoryView> {
        let open = self.entities.get(&viewer)?.open_inventory?;
        let inventory = self.inventories.get(&open)?;
        Some(InventoryView::new(viewer, open, inventory.size()))
    }

    pub fn cursor(&self, viewer: ViewerId) -> Option<&ItemStack> {
        self.entities.get(&viewer).and_then(|entity| entity.cursor.as_ref())
    }

    pub fn set_cursor(&mut self, viewer: ViewerId, cursor: Option<ItemStack>) {
        if let Some(entity) = self.entities.get_mut(&viewer) {
            entity.cursor = cursor;
        }
    }

    /// Item at a raw slot of a view
    pub fn item_at(&self, view: &InventoryView, raw_slot: i32) -> Option<ItemStack> {
        match view.zone(raw_slot) {
            SlotZone::Top => self.inventory(view.top)?.item(raw_slot as usize).cloned(),
            SlotZone::Bottom => {
                let index = view.storage_index(raw_slot)?;
                self.entity(view.viewer)?.inventory.item(index).cloned()
            }
            SlotZone::Outside => None,
        }
    }

    pub fn poll_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Run every task queued so far. Returns how many ran.
    pub fn run_due_tasks(&mut self) -> usize {
        let mut ran = 0;

        for task in self.scheduler.take_due() {
            if let TaskTarget::Entity(entity) = task.target {
                if !self.entities.contains_key(&entity) {
                    log::debug!("[Host::run_due_tasks] Retired task for missing {}", entity);
                    continue;
                }
            }

            task.run(self);
            ran += 1;
        }

        ran
    }

    /// Whether events or tasks are waiting
    pub fn is_busy(&self) -> bool {
        self.has_pending_events() || !self.scheduler.is_empty()
    }
}
