/// Inventory Components
///
/// A component is a fixed-size grid that owns panes and materializes them into
/// a flat, row-major slot array. Guis pin components onto slot ranges of a host
/// inventory or onto the viewer's own inventory.

use crate::constants::{grid::ROW_LENGTH, HOTBAR_SIZE};
use crate::error::GuiResult;
use crate::host::{Host, InventoryClickEvent};
use crate::inventory::{ItemStack, PlayerInventory};
use crate::pane::{by_priority, check_fits, ClickTarget, Pane};

fn place_grid(items: &[Option<ItemStack>], slots: &mut [Option<ItemStack>], offset: usize) {
    for (index, item) in items.iter().enumerate() {
        if let Some(slot) = slots.get_mut(offset + index) {
            *slot = item.clone();
        }
    }
}

/// Rows 0..=2 go to the main storage, row 3 to the hotbar
fn place_player_grid(items: &[Option<ItemStack>], width: usize, inventory: &mut PlayerInventory) {
    for (index, item) in items.iter().enumerate() {
        let (x, y) = (index % width, index / width);

        if x >= ROW_LENGTH {
            continue;
        }

        let slot = match y {
            0..=2 => HOTBAR_SIZE + y * ROW_LENGTH + x,
            3 => x,
            _ => continue,
        };

        inventory.set_item(slot, item.clone());
    }
}

#[derive(Debug, Clone)]
pub struct InventoryComponent {
    width: usize,
    height: usize,
    panes: Vec<Pane>,
    /// Result of the last `display`
    items: Vec<Option<ItemStack>>,
}

impl InventoryComponent {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            panes: Vec::new(),
            items: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_pane(&mut self, pane: Pane) -> GuiResult<()> {
        check_fits(&pane, self.width, self.height)?;
        self.panes.push(pane);
        Ok(())
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane_mut(&mut self, index: usize) -> Option<&mut Pane> {
        self.panes.get_mut(index)
    }

    pub fn clear_panes(&mut self) {
        self.panes.clear();
    }

    /// Materialize the visible panes without storing the result
    pub fn rendered(&self) -> Vec<Option<ItemStack>> {
        let mut grid = vec![None; self.len()];

        for pane in by_priority(&self.panes) {
            pane.render(&mut grid, self.width, 0, 0);
        }

        grid
    }

    /// Re-materialize the panes into the slot array
    pub fn display(&mut self) {
        self.items = self.rendered();
    }

    /// Display and copy the result into `slots` starting at `offset`
    pub fn display_into(&mut self, slots: &mut [Option<ItemStack>], offset: usize) {
        self.display();
        self.place_items(slots, offset);
    }

    pub fn item(&self, x: usize, y: usize) -> Option<&ItemStack> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.items.get(y * self.width + x).and_then(Option::as_ref)
    }

    pub fn items(&self) -> &[Option<ItemStack>] {
        &self.items
    }

    /// Whether the last display produced any item
    pub fn has_item(&self) -> bool {
        self.items.iter().any(Option::is_some)
    }

    pub fn place_items(&self, slots: &mut [Option<ItemStack>], offset: usize) {
        place_grid(&self.items, slots, offset);
    }

    pub fn place_into_player_inventory(&self, inventory: &mut PlayerInventory) {
        place_player_grid(&self.items, self.width, inventory);
    }

    /// Handlers for a click on `slot`, or `None` when no pane owns it
    pub fn resolve_click(&self, slot: usize) -> Option<Vec<ClickTarget>> {
        if slot >= self.len() {
            return None;
        }

        let (x, y) = (slot % self.width, slot / self.width);
        let mut targets = Vec::new();

        let owned = by_priority(&self.panes)
            .into_iter()
            .rev()
            .any(|pane| pane.resolve_click(x, y, &mut targets));

        owned.then_some(targets)
    }

    /// Route a click on a local slot to the owning pane. Returns whether a pane owned it.
    pub fn click(&self, event: &mut InventoryClickEvent, host: &mut Host, slot: usize) -> bool {
        ClickTarget::invoke_all(self.resolve_click(slot), event, host)
    }

    /// Read-only view with rows `from..=to` removed
    pub fn exclude_rows(&self, from: usize, to: usize) -> ComponentSlice {
        let items = self
            .items
            .chunks(self.width.max(1))
            .enumerate()
            .filter(|(row, _)| *row < from || *row > to)
            .flat_map(|(_, row)| row.iter().cloned())
            .collect::<Vec<_>>();

        ComponentSlice {
            width: self.width,
            height: items.len() / self.width.max(1),
            items,
        }
    }
}

/// Rows of a displayed component, detached from its panes
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSlice {
    width: usize,
    height: usize,
    items: Vec<Option<ItemStack>>,
}

impl ComponentSlice {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn item(&self, x: usize, y: usize) -> Option<&ItemStack> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.items.get(y * self.width + x).and_then(Option::as_ref)
    }

    pub fn has_item(&self) -> bool {
        self.items.iter().any(Option::is_some)
    }

    pub fn place_items(&self, slots: &mut [Option<ItemStack>], offset: usize) {
        place_grid(&self.items, slots, offset);
    }

    pub fn place_into_player_inventory(&self, inventory: &mut PlayerInventory) {
        place_player_grid(&self.items, self.width, inventory);
    }
}
