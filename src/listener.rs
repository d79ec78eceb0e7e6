/// Event Router
///
/// Receives the host's inventory events, finds the gui that owns the event's
/// inventory and dispatches to the gui's callbacks and components. Tracks the
/// guis that currently have viewers so they can all be closed on shutdown.

use crate::config::GuiConfig;
use crate::gui::{GuiHandle, GuiKind};
use crate::host::{
    ClickType, DragType, EntityPickupItemEvent, Host, HostEvent, InventoryAction, InventoryClickEvent,
    InventoryCloseEvent, InventoryDragEvent, InventoryOpenEvent, SlotZone, TradeSelectEvent, ViewerId,
};

/// How a shutdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every gui was closed
    Converged { passes: usize },
    /// Guis kept reopening until the pass limit was hit
    Exhausted { remaining: usize },
}

#[derive(Debug, Default)]
pub struct GuiListener {
    config: GuiConfig,
    active: Vec<GuiHandle>,
}

fn refresh_off_hand(host: &mut Host, viewer: ViewerId) {
    if let Some(entity) = host.entity_mut(viewer) {
        entity.inventory.refresh_off_hand();
    }
}

/// Whether the viewer currently looks at an inventory of `gui`
fn is_viewing(host: &Host, viewer: ViewerId, gui: &GuiHandle) -> bool {
    host.entity(viewer)
        .and_then(|entity| entity.open_inventory)
        .and_then(|open| host.holder(open))
        .map_or(false, |holder| holder.ptr_eq(gui))
}

impl GuiListener {
    pub fn new(config: GuiConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Guis with viewers, in the order they were opened
    pub fn active_guis(&self) -> &[GuiHandle] {
        &self.active
    }

    pub fn is_active(&self, gui: &GuiHandle) -> bool {
        self.active.iter().any(|active| active.ptr_eq(gui))
    }

    pub fn on_inventory_click(&mut self, host: &mut Host, event: &mut InventoryClickEvent) {
        let Some(gui) = host.holder(event.view.top) else {
            return;
        };

        if event.is_cancelled() {
            return;
        }

        if event.current_item.is_none() {
            event.current_item = host.item_at(&event.view, event.raw_slot);
        }

        let zone = event.zone();
        let handlers = gui.lock().handlers().clone();

        if zone == SlotZone::Outside {
            if let Some(handler) = &handlers.outside_click {
                handler(event, host);
            }
            return;
        }

        if let Some(handler) = &handlers.global_click {
            handler(event, host);
        }

        let zone_handler = match zone {
            SlotZone::Top => &handlers.top_click,
            _ => &handlers.bottom_click,
        };

        if let Some(handler) = zone_handler {
            handler(event, host);
        }

        let owned = gui.click(event, host);
        log::debug!(
            "[GuiListener::on_inventory_click] Slot {} ({:?}) of {}, pane owned: {}",
            event.raw_slot,
            zone,
            event.view.top,
            owned
        );

        if event.is_cancelled() && self.config.refresh_off_hand {
            let viewer = event.viewer();
            host.scheduler.run_next_tick(move |host| refresh_off_hand(host, viewer));
        }
    }

    pub fn on_inventory_drag(&mut self, host: &mut Host, event: &mut InventoryDragEvent) {
        let Some(gui) = host.holder(event.view.top) else {
            return;
        };

        let slots: Vec<i32> = event.raw_slots().collect();

        if slots.len() > 1 {
            let handlers = gui.lock().handlers().clone();

            if let Some(handler) = &handlers.global_drag {
                handler(event, host);
            }

            if event.touches(SlotZone::Top) {
                if let Some(handler) = &handlers.top_drag {
                    handler(event, host);
                }
            }

            if event.touches(SlotZone::Bottom) {
                if let Some(handler) = &handlers.bottom_drag {
                    handler(event, host);
                }
            }

            return;
        }

        let Some(&slot) = slots.first() else {
            return;
        };

        let (click, action) = match event.drag_type {
            DragType::Even => (ClickType::Left, InventoryAction::PlaceSome),
            DragType::Single => (ClickType::Right, InventoryAction::PlaceOne),
        };

        let viewer = event.viewer();
        let previous_cursor = host.cursor(viewer).cloned();

        // The click sees the cursor as it was before the drag
        host.set_cursor(viewer, event.old_cursor.clone());

        let mut click_event = InventoryClickEvent::new(event.view, slot, click, action);
        self.on_inventory_click(host, &mut click_event);

        // A cursor still equal to the old one counts as untouched, even if a handler set it
        if host.cursor(viewer) == event.old_cursor.as_ref() {
            host.set_cursor(viewer, previous_cursor);
        }

        event.set_cancelled(click_event.is_cancelled());
    }

    pub fn on_inventory_open(&mut self, host: &mut Host, event: &InventoryOpenEvent) {
        let Some(gui) = host.holder(event.inventory) else {
            return;
        };

        if !self.is_active(&gui) {
            log::info!("[GuiListener::on_inventory_open] Activated {:?}", gui);
            self.active.push(gui.clone());
        }

        let handler = gui.lock().handlers().open.clone();

        if let Some(handler) = handler {
            handler(event, host);
        }
    }

    pub fn on_inventory_close(&mut self, host: &mut Host, event: &InventoryCloseEvent) {
        let Some(gui) = host.holder(event.inventory) else {
            return;
        };

        let viewer = event.viewer;

        if self.config.refresh_off_hand {
            refresh_off_hand(host, viewer);
        }

        // Moved to a recreated inventory of the same gui
        if is_viewing(host, viewer, &gui) {
            log::debug!("[GuiListener::on_inventory_close] {} is still viewing {:?}", viewer, gui);
            return;
        }

        let handler = gui.lock().handlers().close.clone();

        if let Some(handler) = handler {
            handler(event, host);
        }

        let restore = gui.clone();
        host.scheduler.run_at_entity(viewer, move |host| {
            if is_viewing(host, viewer, &restore) {
                return;
            }

            if let Err(e) = restore.lock().cache_mut().restore_and_forget(host, viewer) {
                log::warn!("[GuiListener::on_inventory_close] Could not restore {}: {}", viewer, e);
            }
        });

        if gui.viewer_count(host) == 0 {
            self.active.retain(|active| !active.ptr_eq(&gui));
            log::info!("[GuiListener::on_inventory_close] Deactivated {:?}", gui);
        }

        let parent = gui.clone();
        host.scheduler.run_next_tick(move |host| {
            if let Err(e) = parent.navigate_to_parent(host, viewer) {
                log::warn!("[GuiListener::on_inventory_close] Could not show parent to {}: {}", viewer, e);
            }
        });
    }

    pub fn on_entity_pickup_item(&mut self, host: &mut Host, event: &mut EntityPickupItemEvent) {
        if event.is_cancelled() {
            return;
        }

        let Some(open) = host.entity(event.entity).and_then(|entity| entity.open_inventory) else {
            return;
        };

        let Some(gui) = host.holder(open) else {
            return;
        };

        let mut gui = gui.lock();

        if !gui.is_player_inventory_used() {
            return;
        }

        let leftover = match gui.cache_mut().add(event.entity, &event.item) {
            Ok(leftover) => leftover,
            Err(e) => {
                log::warn!("[GuiListener::on_entity_pickup_item] {}", e);
                return;
            }
        };

        if leftover == 0 {
            event.item_removed = true;
        }

        event.item.count = leftover;
        event.set_cancelled(true);
    }

    pub fn on_trade_select(&mut self, host: &mut Host, event: &mut TradeSelectEvent) {
        if event.is_cancelled() {
            return;
        }

        let Some(gui) = host.holder(event.view.top) else {
            return;
        };

        let handler = {
            let gui = gui.lock();

            if gui.kind() != GuiKind::Merchant {
                return;
            }

            gui.handlers().trade_select.clone()
        };

        if let Some(handler) = handler {
            handler(event, host);
        }
    }

    /// Route one polled lifecycle event without running scheduled tasks
    pub fn dispatch(&mut self, host: &mut Host, event: HostEvent) {
        match event {
            HostEvent::Open(open) => self.on_inventory_open(host, &open),
            HostEvent::Close(close) => self.on_inventory_close(host, &close),
        }
    }

    /// Drain queued host events and due tasks until nothing is left or the
    /// round limit is hit. Returns whether the host settled.
    pub fn process_pending(&mut self, host: &mut Host) -> bool {
        for _ in 0..self.config.max_settle_rounds {
            if !host.is_busy() {
                return true;
            }

            let events: Vec<HostEvent> = std::iter::from_fn(|| host.poll_event()).collect();

            for event in events {
                self.dispatch(host, event);
            }

            host.run_due_tasks();
        }

        let settled = !host.is_busy();

        if !settled {
            log::warn!(
                "[GuiListener::process_pending] Host still busy after {} rounds",
                self.config.max_settle_rounds
            );
        }

        settled
    }

    /// Close every active gui. Callbacks may reopen guis, so closing is
    /// repeated up to the configured number of passes.
    pub fn shutdown(&mut self, host: &mut Host) -> ShutdownOutcome {
        self.process_pending(host);

        let mut passes = 0;

        while !self.active.is_empty() && passes < self.config.shutdown_max_passes {
            passes += 1;

            self.active.retain(|gui| gui.viewer_count(host) > 0);

            for gui in self.active.clone() {
                for viewer in gui.viewers(host) {
                    if let Err(e) = host.close_inventory(viewer) {
                        log::warn!("[GuiListener::shutdown] Could not close {}: {}", viewer, e);
                    }
                }
            }

            self.process_pending(host);
        }

        if self.active.is_empty() {
            log::info!("[GuiListener::shutdown] Closed all guis after {} passes", passes);
            ShutdownOutcome::Converged { passes }
        } else {
            log::warn!(
                "[GuiListener::shutdown] Unable to close guis: they keep getting opened (tried {} times)",
                passes
            );

            // Viewers still get their own items back
            for gui in &self.active {
                gui.lock().cache_mut().restore_all(host);
            }

            ShutdownOutcome::Exhausted {
                remaining: self.active.len(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::OUTSIDE_SLOT;
    use crate::gui::Gui;
    use crate::host::InventoryView;
    use crate::inventory::{ItemId, ItemStack};
    use crate::version::Version;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn setup(kind: GuiKind) -> (Host, ViewerId, GuiHandle, GuiListener) {
        let mut host = Host::new(Version::V1_21_4);
        let viewer = host.spawn_player("Alex");
        let gui = GuiHandle::new(Gui::new(kind, "Test"));
        (host, viewer, gui, GuiListener::default())
    }

    #[test]
    fn test_open_activates_and_close_deactivates() {
        let (mut host, viewer, gui, mut listener) = setup(GuiKind::Hopper);

        gui.show(&mut host, viewer).expect("show");
        listener.process_pending(&mut host);
        assert!(listener.is_active(&gui));

        host.close_inventory(viewer).expect("close");
        listener.process_pending(&mut host);
        assert!(!listener.is_active(&gui));
    }

    #[test]
    fn test_outside_click_only_runs_outside_hook() {
        let (mut host, viewer, gui, mut listener) = setup(GuiKind::Hopper);
        let outside = Arc::new(AtomicUsize::new(0));
        let global = Arc::new(AtomicUsize::new(0));

        {
            let mut gui = gui.lock();
            let counter = outside.clone();
            gui.set_on_outside_click(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            let counter = global.clone();
            gui.set_on_global_click(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        gui.show(&mut host, viewer).expect("show");
        let view = host.view(viewer).expect("open");

        let mut event = InventoryClickEvent::new(view, OUTSIDE_SLOT, ClickType::Left, InventoryAction::Nothing);
        listener.on_inventory_click(&mut host, &mut event);

        assert_eq!(outside.load(Ordering::SeqCst), 1);
        assert_eq!(global.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancelled_click_refreshes_off_hand_next_tick() {
        let (mut host, viewer, gui, mut listener) = setup(GuiKind::Hopper);
        gui.lock().set_on_global_click(|event, _| event.set_cancelled(true));
        gui.show(&mut host, viewer).expect("show");
        listener.process_pending(&mut host);

        let view = host.view(viewer).expect("open");
        let updates = host.entity(viewer).map(|e| e.inventory.off_hand_updates());

        let mut event = InventoryClickEvent::new(view, 0, ClickType::Left, InventoryAction::PickupAll);
        listener.on_inventory_click(&mut host, &mut event);

        assert!(event.is_cancelled());
        assert_eq!(host.entity(viewer).map(|e| e.inventory.off_hand_updates()), updates);

        listener.process_pending(&mut host);
        assert_eq!(
            host.entity(viewer).map(|e| e.inventory.off_hand_updates()),
            updates.map(|u| u + 1)
        );
    }

    #[test]
    fn test_multi_slot_drag_runs_zone_hooks() {
        let (mut host, viewer, gui, mut listener) = setup(GuiKind::Hopper);
        let top = Arc::new(AtomicUsize::new(0));
        let bottom = Arc::new(AtomicUsize::new(0));

        {
            let mut gui = gui.lock();
            let counter = top.clone();
            gui.set_on_top_drag(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            let counter = bottom.clone();
            gui.set_on_bottom_drag(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        gui.show(&mut host, viewer).expect("show");
        let view = host.view(viewer).expect("open");

        let items = [(0, ItemStack::single(ItemId(1))), (1, ItemStack::single(ItemId(1)))]
            .into_iter()
            .collect();
        let mut event = InventoryDragEvent::new(view, items, DragType::Even, None);
        listener.on_inventory_drag(&mut host, &mut event);

        assert_eq!(top.load(Ordering::SeqCst), 1);
        assert_eq!(bottom.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_events_for_foreign_inventories_are_ignored() {
        let (mut host, viewer, _gui, mut listener) = setup(GuiKind::Hopper);
        let plain = host.create_inventory(crate::host::InventoryType::Hopper, 5, "plain", None);
        host.open_inventory(viewer, plain).expect("open");

        let view = InventoryView::new(viewer, plain, 5);
        let mut event = InventoryClickEvent::new(view, 0, ClickType::Left, InventoryAction::PickupAll);
        listener.on_inventory_click(&mut host, &mut event);

        assert!(!event.is_cancelled());
        assert!(listener.process_pending(&mut host));
        assert!(listener.active_guis().is_empty());
    }
}
