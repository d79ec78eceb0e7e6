use crate::host::{Host, InventoryClickEvent};
use crate::inventory::ItemStack;
use std::fmt;
use std::sync::Arc;

/// Callback invoked for a click. Shared between copies of a gui.
pub type ClickHandler = Arc<dyn Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync>;

/// An item placed in a pane
#[derive(Clone)]
pub struct GuiItem {
    item: ItemStack,
    action: Option<ClickHandler>,
    visible: bool,
}

impl GuiItem {
    pub fn new(item: ItemStack) -> Self {
        Self {
            item,
            action: None,
            visible: true,
        }
    }

    pub fn with_action(
        item: ItemStack,
        action: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static,
    ) -> Self {
        Self {
            item,
            action: Some(Arc::new(action)),
            visible: true,
        }
    }

    pub fn item(&self) -> &ItemStack {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut ItemStack {
        &mut self.item
    }

    pub fn action(&self) -> Option<&ClickHandler> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<ClickHandler>) {
        self.action = action;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl fmt::Debug for GuiItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiItem")
            .field("item", &self.item)
            .field("has_action", &self.action.is_some())
            .field("visible", &self.visible)
            .finish()
    }
}
