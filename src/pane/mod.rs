//! Layered rectangular regions of items
//!
//! A pane sits at an origin inside its parent grid (a component or another
//! pane) and holds items at local positions. Panes overlap freely; priority
//! decides which one is drawn on top and which one owns a click.

pub mod gui_item;

pub use gui_item::{ClickHandler, GuiItem};

use crate::error::{GuiError, GuiResult};
use crate::host::{Host, InventoryClickEvent};
use crate::inventory::ItemStack;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Drawing and click order of overlapping panes. Higher is drawn on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

/// A handler found for a click, in invocation order
#[derive(Clone)]
pub struct ClickTarget {
    pub handler: ClickHandler,
    /// Item the handler belongs to, if it is an item action
    pub item: Option<ItemStack>,
}

impl ClickTarget {
    pub fn invoke(&self, event: &mut InventoryClickEvent, host: &mut Host) {
        if let Some(item) = &self.item {
            event.current_item = Some(item.clone());
        }

        (self.handler)(event, host)
    }

    /// Run resolved targets in order. Returns whether any pane owned the click.
    pub fn invoke_all(targets: Option<Vec<ClickTarget>>, event: &mut InventoryClickEvent, host: &mut Host) -> bool {
        let Some(targets) = targets else {
            return false;
        };

        for target in &targets {
            target.invoke(event, host);
        }

        true
    }
}

impl fmt::Debug for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickTarget").field("item", &self.item).finish_non_exhaustive()
    }
}

/// Stable order by priority, lowest first. Equal priorities keep insertion order.
pub(crate) fn by_priority(panes: &[Pane]) -> Vec<&Pane> {
    let mut ordered: Vec<&Pane> = panes.iter().collect();
    ordered.sort_by_key(|pane| pane.priority);
    ordered
}

pub(crate) fn check_fits(pane: &Pane, max_width: usize, max_height: usize) -> GuiResult<()> {
    let fits_x = pane.x.checked_add(pane.width).is_some_and(|right| right <= max_width);
    let fits_y = pane.y.checked_add(pane.height).is_some_and(|bottom| bottom <= max_height);

    if !fits_x || !fits_y {
        return Err(GuiError::PaneOutOfBounds {
            x: pane.x,
            y: pane.y,
            width: pane.width,
            height: pane.height,
            max_width,
            max_height,
        });
    }

    Ok(())
}

#[derive(Clone)]
pub struct Pane {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    items: BTreeMap<(usize, usize), GuiItem>,
    priority: Priority,
    visible: bool,
    on_click: Option<ClickHandler>,
    panes: Vec<Pane>,
}

impl Pane {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            items: BTreeMap::new(),
            priority: Priority::Normal,
            visible: true,
            on_click: None,
            panes: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_on_click(
        &mut self,
        handler: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static,
    ) {
        self.on_click = Some(Arc::new(handler));
    }

    /// Place an item at a local position
    pub fn add_item(&mut self, item: GuiItem, x: usize, y: usize) -> GuiResult<()> {
        if x >= self.width || y >= self.height {
            return Err(GuiError::PaneOutOfBounds {
                x,
                y,
                width: 1,
                height: 1,
                max_width: self.width,
                max_height: self.height,
            });
        }

        self.items.insert((x, y), item);
        Ok(())
    }

    pub fn remove_item(&mut self, x: usize, y: usize) -> Option<GuiItem> {
        self.items.remove(&(x, y))
    }

    pub fn item_at(&self, x: usize, y: usize) -> Option<&GuiItem> {
        self.items.get(&(x, y))
    }

    pub fn item_at_mut(&mut self, x: usize, y: usize) -> Option<&mut GuiItem> {
        self.items.get_mut(&(x, y))
    }

    /// Items with their local positions, row by row
    pub fn items(&self) -> impl Iterator<Item = ((usize, usize), &GuiItem)> {
        let mut entries: Vec<_> = self.items.iter().map(|(&pos, item)| (pos, item)).collect();
        entries.sort_by_key(|&((x, y), _)| (y, x));
        entries.into_iter()
    }

    /// Put `item` in every empty position
    pub fn fill_with(&mut self, item: ItemStack, action: Option<ClickHandler>) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.items.entry((x, y)).or_insert_with(|| {
                    let mut gui_item = GuiItem::new(item.clone());
                    gui_item.set_action(action.clone());
                    gui_item
                });
            }
        }
    }

    /// Remove all items and nested panes
    pub fn clear(&mut self) {
        self.items.clear();
        self.panes.clear();
    }

    /// Nest a pane; its origin is relative to this pane
    pub fn add_pane(&mut self, pane: Pane) -> GuiResult<()> {
        check_fits(&pane, self.width, self.height)?;
        self.panes.push(pane);
        Ok(())
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut [Pane] {
        &mut self.panes
    }

    /// Whether the pane covers a position of its parent grid
    pub fn covers(&self, x: usize, y: usize) -> bool {
        x >= self.x && x - self.x < self.width && y >= self.y && y - self.y < self.height
    }

    /// Whether anything visible would be drawn
    pub fn has_visible_item(&self) -> bool {
        self.visible
            && (self.items.values().any(GuiItem::is_visible)
                || self.panes.iter().any(Pane::has_visible_item))
    }

    /// Draw into `grid`, where the parent's origin sits at (`origin_x`, `origin_y`)
    pub(crate) fn render(
        &self,
        grid: &mut [Option<ItemStack>],
        grid_width: usize,
        origin_x: usize,
        origin_y: usize,
    ) {
        if !self.visible {
            return;
        }

        let left = origin_x + self.x;
        let top = origin_y + self.y;

        for (&(x, y), item) in &self.items {
            if !item.is_visible() {
                continue;
            }

            if let Some(slot) = grid.get_mut((top + y) * grid_width + left + x) {
                *slot = Some(item.item().clone());
            }
        }

        for pane in by_priority(&self.panes) {
            pane.render(grid, grid_width, left, top);
        }
    }

    /// Collect the handlers for a click at (`x`, `y`) of the parent grid.
    ///
    /// Returns whether this pane owns the click: it is visible and covers the
    /// position. An owning pane contributes its own handler first, then the
    /// owning nested pane or, if none, the action of the item at that position.
    pub fn resolve_click(&self, x: usize, y: usize, targets: &mut Vec<ClickTarget>) -> bool {
        if !self.visible || !self.covers(x, y) {
            return false;
        }

        let (local_x, local_y) = (x - self.x, y - self.y);

        if let Some(handler) = &self.on_click {
            targets.push(ClickTarget {
                handler: handler.clone(),
                item: None,
            });
        }

        let nested = by_priority(&self.panes)
            .into_iter()
            .rev()
            .any(|pane| pane.resolve_click(local_x, local_y, targets));

        if nested {
            return true;
        }

        if let Some(item) = self.items.get(&(local_x, local_y)).filter(|item| item.is_visible()) {
            if let Some(action) = item.action() {
                targets.push(ClickTarget {
                    handler: action.clone(),
                    item: Some(item.item().clone()),
                });
            }
        }

        true
    }
}

impl fmt::Debug for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pane")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("priority", &self.priority)
            .field("visible", &self.visible)
            .field("items", &self.items.len())
            .field("panes", &self.panes)
            .finish()
    }
}
