// Single-slot drags behave like the click they stand for

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use inventory_gui::{
    ClickType, ComponentName, DragType, Gui, GuiHandle, GuiItem, GuiKind, GuiListener, Host, InventoryAction,
    InventoryClickEvent, InventoryDragEvent, ItemId, ItemStack, Pane, Version, ViewerId,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stack(id: u32, count: u32) -> ItemStack {
    ItemStack::new(ItemId(id), count)
}

/// Hopper with a cancelling button in slot 0 and a cursor-changing button in slot 1
fn setup(on_slot_two: Option<ItemStack>) -> Result<(Host, ViewerId, GuiHandle, GuiListener)> {
    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");

    let mut pane = Pane::new(0, 0, 5, 1);
    pane.add_item(
        GuiItem::with_action(stack(1, 1), |event, _| event.set_cancelled(true)),
        0,
        0,
    )?;
    pane.add_item(
        GuiItem::with_action(stack(2, 1), |event, host| {
            let viewer = event.viewer();
            host.set_cursor(viewer, Some(ItemStack::new(ItemId(99), 1)));
        }),
        1,
        0,
    )?;
    pane.add_item(
        GuiItem::with_action(stack(3, 1), move |event, host| {
            let viewer = event.viewer();
            host.set_cursor(viewer, on_slot_two.clone());
        }),
        2,
        0,
    )?;

    let mut gui = Gui::new(GuiKind::Hopper, "Buttons");
    gui.component_mut(ComponentName::Slots)
        .context("hopper has slots")?
        .add_pane(pane)?;

    let gui = GuiHandle::new(gui);
    gui.show(&mut host, viewer)?;

    let mut listener = GuiListener::default();
    listener.process_pending(&mut host);

    Ok((host, viewer, gui, listener))
}

fn drag(host: &Host, viewer: ViewerId, slot: i32, drag_type: DragType, old_cursor: ItemStack) -> Result<InventoryDragEvent> {
    let view = host.view(viewer).context("viewer has nothing open")?;
    let mut items = BTreeMap::new();
    items.insert(slot, stack(old_cursor.item_id.0, 1));
    Ok(InventoryDragEvent::new(view, items, drag_type, Some(old_cursor)))
}

#[test]
fn test_drag_matches_click_cancellation() -> Result<()> {
    init_logger();

    let (mut host, viewer, _gui, mut listener) = setup(None)?;
    let old_cursor = stack(5, 10);

    for slot in [0, 1, 3] {
        host.set_cursor(viewer, Some(old_cursor.clone()));
        let view = host.view(viewer).context("open")?;
        let mut click = InventoryClickEvent::new(view, slot, ClickType::Left, InventoryAction::PlaceSome);
        listener.on_inventory_click(&mut host, &mut click);
        let click_cursor = host.cursor(viewer).cloned();

        host.set_cursor(viewer, Some(old_cursor.clone()));
        let mut event = drag(&host, viewer, slot, DragType::Even, old_cursor.clone())?;
        listener.on_inventory_drag(&mut host, &mut event);

        assert_eq!(event.is_cancelled(), click.is_cancelled(), "slot {}", slot);
        assert_eq!(host.cursor(viewer).cloned(), click_cursor, "slot {}", slot);
    }

    Ok(())
}

#[test]
fn test_untouched_cursor_goes_back_to_pre_drag_state() -> Result<()> {
    init_logger();

    let (mut host, viewer, _gui, mut listener) = setup(None)?;

    // The host already shows what is left on the cursor after the drag
    let remainder = stack(5, 9);
    host.set_cursor(viewer, Some(remainder.clone()));

    let mut event = drag(&host, viewer, 0, DragType::Single, stack(5, 10))?;
    listener.on_inventory_drag(&mut host, &mut event);

    assert!(event.is_cancelled());
    assert_eq!(host.cursor(viewer), Some(&remainder));
    Ok(())
}

#[test]
fn test_handler_cursor_change_survives() -> Result<()> {
    init_logger();

    let (mut host, viewer, _gui, mut listener) = setup(None)?;
    host.set_cursor(viewer, Some(stack(5, 9)));

    let mut event = drag(&host, viewer, 1, DragType::Even, stack(5, 10))?;
    listener.on_inventory_drag(&mut host, &mut event);

    assert!(!event.is_cancelled());
    assert_eq!(host.cursor(viewer), Some(&ItemStack::new(ItemId(99), 1)));
    Ok(())
}

#[test]
fn test_handler_setting_old_cursor_counts_as_unchanged() -> Result<()> {
    init_logger();

    let old_cursor = stack(5, 10);
    let (mut host, viewer, _gui, mut listener) = setup(Some(old_cursor.clone()))?;

    let remainder = stack(5, 9);
    host.set_cursor(viewer, Some(remainder.clone()));

    let mut event = drag(&host, viewer, 2, DragType::Even, old_cursor)?;
    listener.on_inventory_drag(&mut host, &mut event);

    // Indistinguishable from a handler that left the cursor alone
    assert_eq!(host.cursor(viewer), Some(&remainder));
    Ok(())
}

#[test]
fn test_drag_over_foreign_inventory_is_ignored() -> Result<()> {
    init_logger();

    let (mut host, viewer, _gui, mut listener) = setup(None)?;
    host.close_inventory(viewer)?;

    let plain = host.create_inventory(inventory_gui::InventoryType::Chest, 27, "Plain", None);
    host.open_inventory(viewer, plain)?;
    host.set_cursor(viewer, Some(stack(5, 9)));

    let mut event = drag(&host, viewer, 0, DragType::Even, stack(5, 10))?;
    listener.on_inventory_drag(&mut host, &mut event);

    assert!(!event.is_cancelled());
    assert_eq!(host.cursor(viewer), Some(&stack(5, 9)));
    Ok(())
}
