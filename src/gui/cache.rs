//! Hidden copies of viewers' own inventories
//!
//! While a gui renders into the player-inventory slots, the viewer's real
//! items are kept here and put back when the gui closes.

use crate::constants::PLAYER_STORAGE_SIZE;
use crate::error::{GuiError, GuiResult};
use crate::host::{Host, ViewerId};
use crate::inventory::{merge_into_slots, ItemStack};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
struct CacheEntry {
    contents: Vec<Option<ItemStack>>,
    cursor: Option<ItemStack>,
}

#[derive(Debug, Clone, Default)]
pub struct HumanEntityCache {
    entries: FxHashMap<ViewerId, CacheEntry>,
}

impl HumanEntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the viewer's storage and cursor, then empty the storage.
    /// Does nothing when the viewer is already cached.
    pub fn store_and_clear(&mut self, host: &mut Host, viewer: ViewerId) -> GuiResult<()> {
        if self.entries.contains_key(&viewer) {
            return Ok(());
        }

        let entity = host.entity_or_err(viewer)?;

        self.entries.insert(
            viewer,
            CacheEntry {
                contents: entity.inventory.storage_contents(),
                cursor: entity.cursor.clone(),
            },
        );
        entity.inventory.clear();

        log::debug!("[HumanEntityCache::store_and_clear] Cached inventory of {}", viewer);
        Ok(())
    }

    /// Put the saved storage and cursor back and forget the entry.
    /// Does nothing when the viewer is not cached.
    pub fn restore_and_forget(&mut self, host: &mut Host, viewer: ViewerId) -> GuiResult<()> {
        let Some(entry) = self.entries.get(&viewer) else {
            return Ok(());
        };

        let entity = host.entity_or_err(viewer)?;
        entity.inventory.set_storage_contents(entry.contents.clone());
        entity.cursor = entry.cursor.clone();

        self.entries.remove(&viewer);

        log::debug!("[HumanEntityCache::restore_and_forget] Restored inventory of {}", viewer);
        Ok(())
    }

    /// Merge `item` into the viewer's cached storage. Returns the amount that did not fit.
    pub fn add(&mut self, viewer: ViewerId, item: &ItemStack) -> GuiResult<u32> {
        let entry = self
            .entries
            .get_mut(&viewer)
            .ok_or(GuiError::ViewerNotCached(viewer))?;

        entry.contents.resize(PLAYER_STORAGE_SIZE, None);
        Ok(merge_into_slots(&mut entry.contents, item))
    }

    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.entries.contains_key(&viewer)
    }

    /// Drop the entry without restoring it
    pub fn forget(&mut self, viewer: ViewerId) -> bool {
        self.entries.remove(&viewer).is_some()
    }

    /// Restore every cached viewer still present on the host
    pub fn restore_all(&mut self, host: &mut Host) {
        let viewers: Vec<ViewerId> = self.entries.keys().copied().collect();

        for viewer in viewers {
            if let Err(e) = self.restore_and_forget(host, viewer) {
                log::warn!("[HumanEntityCache::restore_all] Could not restore {}: {}", viewer, e);
                self.entries.remove(&viewer);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemId;
    use crate::version::Version;

    fn setup() -> (Host, ViewerId) {
        let mut host = Host::new(Version::V1_20_1);
        let viewer = host.spawn_player("Alex");

        let entity = host.entity_mut(viewer).expect("spawned");
        entity.inventory.set_item(0, Some(ItemStack::new(ItemId(1), 10)));
        entity.inventory.set_item(20, Some(ItemStack::new(ItemId(2), 3)));
        entity.cursor = Some(ItemStack::single(ItemId(5)));

        (host, viewer)
    }

    #[test]
    fn test_store_and_clear_is_idempotent() {
        let (mut host, viewer) = setup();
        let mut cache = HumanEntityCache::new();

        cache.store_and_clear(&mut host, viewer).expect("store");
        let once = cache.entries.get(&viewer).cloned();

        // Anything placed into the live inventory now must not be captured
        host.entity_mut(viewer)
            .expect("spawned")
            .inventory
            .set_item(4, Some(ItemStack::single(ItemId(9))));

        cache.store_and_clear(&mut host, viewer).expect("store again");
        assert_eq!(cache.entries.get(&viewer).cloned(), once);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_restore_reproduces_contents_and_cursor() {
        let (mut host, viewer) = setup();
        let before = host.entity(viewer).map(|e| (e.inventory.storage_contents(), e.cursor.clone()));
        let mut cache = HumanEntityCache::new();

        cache.store_and_clear(&mut host, viewer).expect("store");
        assert!(host.entity(viewer).map(|e| e.inventory.is_empty()).unwrap_or(false));

        host.set_cursor(viewer, None);
        cache.restore_and_forget(&mut host, viewer).expect("restore");

        let after = host.entity(viewer).map(|e| (e.inventory.storage_contents(), e.cursor.clone()));
        assert_eq!(before, after);
        assert!(!cache.contains(viewer));
    }

    #[test]
    fn test_restore_without_entry_is_noop() {
        let (mut host, viewer) = setup();
        let mut cache = HumanEntityCache::new();

        cache.restore_and_forget(&mut host, viewer).expect("noop");
        assert_eq!(host.entity(viewer).and_then(|e| e.inventory.item(0)).map(|s| s.count), Some(10));
    }

    #[test]
    fn test_add_merges_into_cached_contents() {
        let (mut host, viewer) = setup();
        let mut cache = HumanEntityCache::new();

        assert!(matches!(
            cache.add(viewer, &ItemStack::single(ItemId(1))),
            Err(GuiError::ViewerNotCached(_))
        ));

        cache.store_and_clear(&mut host, viewer).expect("store");
        assert_eq!(cache.add(viewer, &ItemStack::new(ItemId(1), 60)).expect("cached"), 0);

        cache.restore_and_forget(&mut host, viewer).expect("restore");
        let entity = host.entity(viewer).expect("spawned");
        assert_eq!(entity.inventory.item(0).map(|s| s.count), Some(64));
        assert_eq!(entity.inventory.item(1).map(|s| s.count), Some(6));
    }

    #[test]
    fn test_add_reports_leftover_when_full() {
        let (mut host, viewer) = setup();
        let mut cache = HumanEntityCache::new();

        for slot in 0..PLAYER_STORAGE_SIZE {
            host.entity_mut(viewer)
                .expect("spawned")
                .inventory
                .set_item(slot, Some(ItemStack::new(ItemId(7), 64)));
        }

        cache.store_and_clear(&mut host, viewer).expect("store");
        assert_eq!(cache.add(viewer, &ItemStack::new(ItemId(8), 5)).expect("cached"), 5);
    }

    #[test]
    fn test_restore_all_and_forget() {
        let (mut host, viewer) = setup();
        let other = host.spawn_player("Steve");
        let mut cache = HumanEntityCache::new();

        cache.store_and_clear(&mut host, viewer).expect("store");
        cache.store_and_clear(&mut host, other).expect("store");
        assert!(cache.forget(other));

        cache.restore_all(&mut host);
        assert!(cache.is_empty());
        assert!(host.entity(viewer).and_then(|e| e.inventory.item(0)).is_some());
    }
}
