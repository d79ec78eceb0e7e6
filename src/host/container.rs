use super::entity::ViewerId;
use crate::gui::GuiHandle;
use crate::inventory::{ItemId, ItemStack};
use crate::version::BackendDescriptor;
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a host container inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(pub u64);

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inventory#{}", self.0)
    }
}

/// Container shapes the host knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryType {
    Chest,
    Barrel,
    Dropper,
    Hopper,
    Furnace,
    BlastFurnace,
    Smoker,
    BrewingStand,
    Workbench,
    Anvil,
    Beacon,
    Cartography,
    EnchantingTable,
    Grindstone,
    Merchant,
    SmithingTable,
    LegacySmithingTable,
    Stonecutter,
}

impl InventoryType {
    /// Slot count of the container. Chests are sized by their row count instead.
    pub fn default_size(self) -> usize {
        match self {
            InventoryType::Chest | InventoryType::Barrel => 27,
            InventoryType::Dropper => 9,
            InventoryType::Hopper => 5,
            InventoryType::Furnace | InventoryType::BlastFurnace | InventoryType::Smoker => 3,
            InventoryType::BrewingStand => 5,
            InventoryType::Workbench => 10,
            InventoryType::Anvil => 3,
            InventoryType::Beacon => 1,
            InventoryType::Cartography => 3,
            InventoryType::EnchantingTable => 2,
            InventoryType::Grindstone => 3,
            InventoryType::Merchant => 3,
            InventoryType::SmithingTable => 4,
            InventoryType::LegacySmithingTable => 3,
            InventoryType::Stonecutter => 2,
        }
    }
}

/// Price of a trade, in the shape the running version expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferCost {
    /// Whole item stack, before 1.20.5
    Stack(ItemStack),
    /// Item type, amount and the exact components to match, 1.20.5 onwards
    Cost {
        item: ItemId,
        count: u32,
        display_name: Option<String>,
    },
}

impl OfferCost {
    pub fn count(&self) -> u32 {
        match self {
            OfferCost::Stack(stack) => stack.count,
            OfferCost::Cost { count, .. } => *count,
        }
    }
}

/// A single trade as sent to a merchant screen
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantOffer {
    pub first_cost: OfferCost,
    pub second_cost: Option<OfferCost>,
    pub result: ItemStack,
    pub uses: u32,
    pub max_uses: u32,
    pub experience: u32,
    pub price_multiplier: f32,
    pub special_price: i32,
}

/// A container inventory owned by the host
#[derive(Debug)]
pub struct Inventory {
    pub id: InventoryId,
    pub kind: InventoryType,
    pub title: String,
    pub slots: Vec<Option<ItemStack>>,
    pub viewers: BTreeSet<ViewerId>,
    /// Gui that created this inventory, if any
    pub holder: Option<GuiHandle>,
    /// Backend that created this inventory, for version specific devices
    pub backend: Option<BackendDescriptor>,
    /// Text typed into an anvil's rename field
    pub rename_text: Option<String>,
}

impl Inventory {
    pub fn new(
        id: InventoryId,
        kind: InventoryType,
        size: usize,
        title: impl Into<String>,
        holder: Option<GuiHandle>,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            slots: vec![None; size],
            viewers: BTreeSet::new(),
            holder,
            backend: None,
            rename_text: None,
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Set a slot; out-of-range indices are ignored
    pub fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(target) = self.slots.get_mut(slot) {
            *target = item;
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}
