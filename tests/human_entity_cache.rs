// Viewer inventories are hidden while a gui renders into them and come back on close

use anyhow::{Context, Result};
use inventory_gui::{
    ComponentName, Gui, GuiHandle, GuiItem, GuiKind, GuiListener, Host, ItemId, ItemStack, Pane, TaskTarget, Version,
    ViewerId,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fill_storage(host: &mut Host, viewer: ViewerId) -> Result<Vec<Option<ItemStack>>> {
    let entity = host.entity_mut(viewer).context("spawned")?;

    for slot in 0..36 {
        entity
            .inventory
            .set_item(slot, Some(ItemStack::new(ItemId(100 + slot as u32), 1 + slot as u32)));
    }

    entity.cursor = Some(ItemStack::single(ItemId(7)));
    Ok(entity.inventory.storage_contents())
}

fn player_rows_gui() -> Result<GuiHandle> {
    let mut pane = Pane::new(0, 0, 9, 4);
    pane.add_item(GuiItem::new(ItemStack::single(ItemId(1))), 0, 0)?;
    pane.add_item(GuiItem::new(ItemStack::single(ItemId(2))), 8, 3)?;

    let mut gui = Gui::new(GuiKind::Hopper, "Hopper");
    gui.component_mut(ComponentName::PlayerInventory)
        .context("hopper has a player inventory component")?
        .add_pane(pane)?;

    Ok(GuiHandle::new(gui))
}

#[test]
fn test_show_then_close_restores_exact_contents() -> Result<()> {
    init_logger();

    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");
    let mut listener = GuiListener::default();
    let original = fill_storage(&mut host, viewer)?;

    let gui = player_rows_gui()?;
    assert!(gui.is_player_inventory_used());

    gui.show(&mut host, viewer)?;
    listener.process_pending(&mut host);

    assert!(gui.lock().cache().contains(viewer));
    let entity = host.entity(viewer).context("spawned")?;
    // Row 0 of the component is the first main storage row, row 3 the hotbar
    assert_eq!(entity.inventory.item(9).map(|s| s.item_id), Some(ItemId(1)));
    assert_eq!(entity.inventory.item(8).map(|s| s.item_id), Some(ItemId(2)));
    assert!(entity.inventory.item(10).is_none());

    host.close_inventory(viewer)?;
    listener.process_pending(&mut host);

    assert!(!gui.lock().cache().contains(viewer));
    let entity = host.entity(viewer).context("spawned")?;
    assert_eq!(entity.inventory.storage_contents(), original);
    assert_eq!(entity.cursor, Some(ItemStack::single(ItemId(7))));

    Ok(())
}

#[test]
fn test_updates_do_not_store_twice() -> Result<()> {
    init_logger();

    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");
    let mut listener = GuiListener::default();
    let original = fill_storage(&mut host, viewer)?;

    let gui = player_rows_gui()?;
    gui.show(&mut host, viewer)?;
    listener.process_pending(&mut host);

    // Re-rendering and recreating the inventory keep the first snapshot
    gui.update(&mut host)?;
    gui.lock().set_title("Renamed");
    gui.update(&mut host)?;
    listener.process_pending(&mut host);

    assert_eq!(gui.viewers(&host), vec![viewer]);
    assert_eq!(gui.lock().cache().len(), 1);

    host.close_inventory(viewer)?;
    listener.process_pending(&mut host);

    assert_eq!(host.entity(viewer).context("spawned")?.inventory.storage_contents(), original);
    Ok(())
}

#[test]
fn test_one_store_and_one_restore_per_session() -> Result<()> {
    init_logger();

    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");
    let mut listener = GuiListener::default();
    let original = fill_storage(&mut host, viewer)?;

    let gui = player_rows_gui()?;
    gui.show(&mut host, viewer)?;
    listener.process_pending(&mut host);
    assert_eq!(gui.lock().cache().len(), 1);

    // Showing again, updating and recreating the inventory never store again
    gui.show(&mut host, viewer)?;
    gui.update(&mut host)?;
    gui.lock().set_title("Renamed");
    gui.update(&mut host)?;
    listener.process_pending(&mut host);
    assert_eq!(gui.lock().cache().len(), 1);
    assert!(host.scheduler.is_empty());

    host.close_inventory(viewer)?;
    while let Some(event) = host.poll_event() {
        listener.dispatch(&mut host, event);
    }

    let tasks = host.scheduler.take_due();
    let restores = tasks
        .iter()
        .filter(|task| task.target == TaskTarget::Entity(viewer))
        .count();
    assert_eq!(restores, 1);

    for task in tasks {
        task.run(&mut host);
    }
    listener.process_pending(&mut host);

    assert!(gui.lock().cache().is_empty());
    assert_eq!(host.entity(viewer).context("spawned")?.inventory.storage_contents(), original);

    // A second restore has nothing left to put back
    let picked_up = ItemStack::new(ItemId(42), 3);
    host.entity_mut(viewer)
        .context("spawned")?
        .inventory
        .set_item(0, Some(picked_up.clone()));

    gui.lock().cache_mut().restore_and_forget(&mut host, viewer)?;
    listener.process_pending(&mut host);

    let entity = host.entity(viewer).context("spawned")?;
    assert_eq!(entity.inventory.item(0), Some(&picked_up));
    assert_eq!(entity.inventory.storage_contents()[1..], original[1..]);
    Ok(())
}

#[test]
fn test_guis_not_using_player_rows_leave_inventory_alone() -> Result<()> {
    init_logger();

    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");
    let mut listener = GuiListener::default();
    let original = fill_storage(&mut host, viewer)?;

    let gui = GuiHandle::new(Gui::new(GuiKind::chest(6)?, "Chest"));
    assert!(!gui.is_player_inventory_used());

    gui.show(&mut host, viewer)?;
    listener.process_pending(&mut host);

    assert!(gui.lock().cache().is_empty());
    assert_eq!(host.entity(viewer).context("spawned")?.inventory.storage_contents(), original);
    Ok(())
}

#[test]
fn test_viewer_leaving_before_restore_retires_task() -> Result<()> {
    init_logger();

    let mut host = Host::new(Version::V1_21_4);
    let viewer = host.spawn_player("Alex");
    let mut listener = GuiListener::default();
    fill_storage(&mut host, viewer)?;

    let gui = player_rows_gui()?;
    gui.show(&mut host, viewer)?;
    listener.process_pending(&mut host);

    host.close_inventory(viewer)?;
    host.remove_entity(viewer);

    assert!(listener.process_pending(&mut host));
    // Restore never ran, so the entry is still there
    assert!(gui.lock().cache().contains(viewer));
    Ok(())
}
