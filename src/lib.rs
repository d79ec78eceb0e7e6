pub mod backend;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod gui;
pub mod host;
pub mod inventory;
pub mod listener;
pub mod pane;
pub mod scheduler;
pub mod version;

pub use backend::{AnvilInventory, ContainerInventory, GuiBackend, MerchantInventory};
pub use component::{ComponentSlice, InventoryComponent};
pub use config::GuiConfig;
pub use error::{GuiError, GuiResult};
pub use gui::{
    ComponentLayout, ComponentName, Gui, GuiDefinition, GuiFlags, GuiHandle, GuiKind, HumanEntityCache,
    MerchantRecipe,
};
pub use host::{
    ClickType, DragType, EntityPickupItemEvent, Host, HostEvent, HumanEntity, Inventory, InventoryAction,
    InventoryClickEvent, InventoryCloseEvent, InventoryDragEvent, InventoryId, InventoryOpenEvent,
    InventoryType, InventoryView, SlotZone, TradeSelectEvent, ViewerId,
};
pub use inventory::{ItemId, ItemStack, PlayerInventory};
pub use listener::{GuiListener, ShutdownOutcome};
pub use pane::{GuiItem, Pane, Priority};
pub use scheduler::{Scheduler, TaskTarget};
pub use version::{BackendDescriptor, BackendFamily, Capability, Version, VersionMatcher};
