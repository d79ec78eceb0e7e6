//! Gui variants as data
//!
//! Every variant is described by the host container it opens, the components
//! it pins onto that container and a set of capability flags.

use crate::constants::grid::{BARREL_ROWS, MAX_CHEST_ROWS, PLAYER_INVENTORY_ROWS, ROW_LENGTH};
use crate::error::{malformed, GuiResult};
use crate::host::InventoryType;
use crate::version::Capability;
use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// What a gui variant is made of and how it is created
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GuiFlags: u8 {
        /// Several components, addressed by name
        const NAMED           = 0b0000_0001;
        /// One component spanning the container and the player inventory
        const MERGED          = 0b0000_0010;
        /// Created through the host's plain inventory API
        const INVENTORY_BASED = 0b0000_0100;
        /// Created by a version specific backend
        const VERSIONED       = 0b0000_1000;
    }
}

/// Names of the components a gui variant is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentName {
    /// The single component of merged variants
    Inventory,
    Contents,
    Slots,
    Ingredient,
    Fuel,
    Output,
    FirstBottle,
    SecondBottle,
    ThirdBottle,
    PotionIngredient,
    BlazePowder,
    Input,
    FirstItem,
    SecondItem,
    Result,
    PaymentItem,
    Map,
    Paper,
    Items,
    PlayerInventory,
}

impl ComponentName {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentName::Inventory => "inventory",
            ComponentName::Contents => "contents",
            ComponentName::Slots => "slots",
            ComponentName::Ingredient => "ingredient",
            ComponentName::Fuel => "fuel",
            ComponentName::Output => "output",
            ComponentName::FirstBottle => "first-bottle",
            ComponentName::SecondBottle => "second-bottle",
            ComponentName::ThirdBottle => "third-bottle",
            ComponentName::PotionIngredient => "potion-ingredient",
            ComponentName::BlazePowder => "blaze-powder",
            ComponentName::Input => "input",
            ComponentName::FirstItem => "first-item",
            ComponentName::SecondItem => "second-item",
            ComponentName::Result => "result",
            ComponentName::PaymentItem => "payment-item",
            ComponentName::Map => "map",
            ComponentName::Paper => "paper",
            ComponentName::Items => "items",
            ComponentName::PlayerInventory => "player-inventory",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentName {
    type Err = crate::error::GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [ComponentName; 20] = [
            ComponentName::Inventory,
            ComponentName::Contents,
            ComponentName::Slots,
            ComponentName::Ingredient,
            ComponentName::Fuel,
            ComponentName::Output,
            ComponentName::FirstBottle,
            ComponentName::SecondBottle,
            ComponentName::ThirdBottle,
            ComponentName::PotionIngredient,
            ComponentName::BlazePowder,
            ComponentName::Input,
            ComponentName::FirstItem,
            ComponentName::SecondItem,
            ComponentName::Result,
            ComponentName::PaymentItem,
            ComponentName::Map,
            ComponentName::Paper,
            ComponentName::Items,
            ComponentName::PlayerInventory,
        ];

        ALL.into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| malformed(format!("unknown component name '{}'", s)))
    }
}

/// Where a component sits. Container components start at `offset` in the
/// top inventory; the player-inventory component starts right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentLayout {
    pub name: ComponentName,
    pub width: usize,
    pub height: usize,
    pub offset: usize,
}

impl ComponentLayout {
    const fn new(name: ComponentName, width: usize, height: usize, offset: usize) -> Self {
        Self { name, width, height, offset }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, slot: usize) -> bool {
        slot >= self.offset && slot < self.offset + self.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiKind {
    Chest { rows: usize },
    Barrel,
    Dropper,
    Hopper,
    Furnace,
    BlastFurnace,
    Smoker,
    BrewingStand,
    CraftingTable,
    Anvil,
    Beacon,
    CartographyTable,
    EnchantingTable,
    Grindstone,
    Merchant,
    SmithingTable,
    LegacySmithingTable,
    Stonecutter,
}

impl GuiKind {
    /// A chest with 1 to 6 rows
    pub fn chest(rows: usize) -> GuiResult<Self> {
        if rows == 0 || rows > MAX_CHEST_ROWS {
            return Err(malformed(format!(
                "chest rows must be between 1 and {}, got {}",
                MAX_CHEST_ROWS, rows
            )));
        }

        Ok(GuiKind::Chest { rows })
    }

    pub fn flags(self) -> GuiFlags {
        match self {
            GuiKind::Chest { .. } | GuiKind::Barrel => GuiFlags::MERGED | GuiFlags::INVENTORY_BASED,
            GuiKind::Dropper
            | GuiKind::Hopper
            | GuiKind::Furnace
            | GuiKind::BlastFurnace
            | GuiKind::Smoker
            | GuiKind::BrewingStand
            | GuiKind::CraftingTable => GuiFlags::NAMED | GuiFlags::INVENTORY_BASED,
            _ => GuiFlags::NAMED | GuiFlags::VERSIONED,
        }
    }

    /// Capability needed from a version backend
    pub fn capability(self) -> Option<Capability> {
        match self {
            GuiKind::Anvil => Some(Capability::Anvil),
            GuiKind::Beacon => Some(Capability::Beacon),
            GuiKind::CartographyTable => Some(Capability::CartographyTable),
            GuiKind::EnchantingTable => Some(Capability::EnchantingTable),
            GuiKind::Grindstone => Some(Capability::Grindstone),
            GuiKind::Merchant => Some(Capability::Merchant),
            GuiKind::SmithingTable => Some(Capability::SmithingTable),
            GuiKind::LegacySmithingTable => Some(Capability::LegacySmithingTable),
            GuiKind::Stonecutter => Some(Capability::Stonecutter),
            _ => None,
        }
    }

    pub fn inventory_type(self) -> InventoryType {
        match self {
            GuiKind::Chest { .. } => InventoryType::Chest,
            GuiKind::Barrel => InventoryType::Barrel,
            GuiKind::Dropper => InventoryType::Dropper,
            GuiKind::Hopper => InventoryType::Hopper,
            GuiKind::Furnace => InventoryType::Furnace,
            GuiKind::BlastFurnace => InventoryType::BlastFurnace,
            GuiKind::Smoker => InventoryType::Smoker,
            GuiKind::BrewingStand => InventoryType::BrewingStand,
            GuiKind::CraftingTable => InventoryType::Workbench,
            GuiKind::Anvil => InventoryType::Anvil,
            GuiKind::Beacon => InventoryType::Beacon,
            GuiKind::CartographyTable => InventoryType::Cartography,
            GuiKind::EnchantingTable => InventoryType::EnchantingTable,
            GuiKind::Grindstone => InventoryType::Grindstone,
            GuiKind::Merchant => InventoryType::Merchant,
            GuiKind::SmithingTable => InventoryType::SmithingTable,
            GuiKind::LegacySmithingTable => InventoryType::LegacySmithingTable,
            GuiKind::Stonecutter => InventoryType::Stonecutter,
        }
    }

    /// Slots of the opened container
    pub fn top_size(self) -> usize {
        match self {
            GuiKind::Chest { rows } => rows * ROW_LENGTH,
            GuiKind::Barrel => BARREL_ROWS * ROW_LENGTH,
            other => other.inventory_type().default_size(),
        }
    }

    /// Rows of the container part of a merged component
    pub fn container_rows(self) -> usize {
        match self {
            GuiKind::Chest { rows } => rows,
            GuiKind::Barrel => BARREL_ROWS,
            _ => 0,
        }
    }

    /// Components in display order. The player-inventory component, if any, is last.
    pub fn layout(self) -> Vec<ComponentLayout> {
        use ComponentName::*;

        let top = match self {
            GuiKind::Chest { .. } | GuiKind::Barrel => {
                let rows = self.container_rows() + PLAYER_INVENTORY_ROWS;
                return vec![ComponentLayout::new(Inventory, ROW_LENGTH, rows, 0)];
            }
            GuiKind::Dropper => vec![ComponentLayout::new(Contents, 3, 3, 0)],
            GuiKind::Hopper => vec![ComponentLayout::new(Slots, 5, 1, 0)],
            GuiKind::Furnace | GuiKind::BlastFurnace | GuiKind::Smoker => vec![
                ComponentLayout::new(Ingredient, 1, 1, 0),
                ComponentLayout::new(Fuel, 1, 1, 1),
                ComponentLayout::new(Output, 1, 1, 2),
            ],
            GuiKind::BrewingStand => vec![
                ComponentLayout::new(FirstBottle, 1, 1, 0),
                ComponentLayout::new(SecondBottle, 1, 1, 1),
                ComponentLayout::new(ThirdBottle, 1, 1, 2),
                ComponentLayout::new(PotionIngredient, 1, 1, 3),
                ComponentLayout::new(BlazePowder, 1, 1, 4),
            ],
            GuiKind::CraftingTable => vec![
                ComponentLayout::new(Output, 1, 1, 0),
                ComponentLayout::new(Input, 3, 3, 1),
            ],
            GuiKind::Anvil => vec![
                ComponentLayout::new(FirstItem, 1, 1, 0),
                ComponentLayout::new(SecondItem, 1, 1, 1),
                ComponentLayout::new(Result, 1, 1, 2),
            ],
            GuiKind::Beacon => vec![ComponentLayout::new(PaymentItem, 1, 1, 0)],
            GuiKind::CartographyTable => vec![
                ComponentLayout::new(Map, 1, 1, 0),
                ComponentLayout::new(Paper, 1, 1, 1),
                ComponentLayout::new(Output, 1, 1, 2),
            ],
            GuiKind::EnchantingTable => vec![ComponentLayout::new(Input, 2, 1, 0)],
            GuiKind::Grindstone => vec![
                ComponentLayout::new(Items, 1, 2, 0),
                ComponentLayout::new(Result, 1, 1, 2),
            ],
            GuiKind::Merchant => vec![
                ComponentLayout::new(Input, 2, 1, 0),
                ComponentLayout::new(Output, 1, 1, 2),
            ],
            GuiKind::SmithingTable => vec![
                ComponentLayout::new(Input, 3, 1, 0),
                ComponentLayout::new(Result, 1, 1, 3),
            ],
            GuiKind::LegacySmithingTable => vec![
                ComponentLayout::new(Input, 2, 1, 0),
                ComponentLayout::new(Result, 1, 1, 2),
            ],
            GuiKind::Stonecutter => vec![
                ComponentLayout::new(Input, 1, 1, 0),
                ComponentLayout::new(Result, 1, 1, 1),
            ],
        };

        let mut layout = top;
        layout.push(ComponentLayout::new(
            PlayerInventory,
            ROW_LENGTH,
            PLAYER_INVENTORY_ROWS,
            self.top_size(),
        ));
        layout
    }

    /// Whether a named component exists in this variant
    pub fn has_component(self, name: ComponentName) -> bool {
        self.layout().iter().any(|layout| layout.name == name)
    }
}

impl fmt::Display for GuiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuiKind::Chest { rows } => write!(f, "chest ({} rows)", rows),
            GuiKind::Barrel => f.write_str("barrel"),
            GuiKind::Dropper => f.write_str("dropper"),
            GuiKind::Hopper => f.write_str("hopper"),
            GuiKind::Furnace => f.write_str("furnace"),
            GuiKind::BlastFurnace => f.write_str("blast furnace"),
            GuiKind::Smoker => f.write_str("smoker"),
            GuiKind::BrewingStand => f.write_str("brewing stand"),
            GuiKind::CraftingTable => f.write_str("crafting table"),
            GuiKind::Anvil => f.write_str("anvil"),
            GuiKind::Beacon => f.write_str("beacon"),
            GuiKind::CartographyTable => f.write_str("cartography table"),
            GuiKind::EnchantingTable => f.write_str("enchanting table"),
            GuiKind::Grindstone => f.write_str("grindstone"),
            GuiKind::Merchant => f.write_str("merchant"),
            GuiKind::SmithingTable => f.write_str("smithing table"),
            GuiKind::LegacySmithingTable => f.write_str("legacy smithing table"),
            GuiKind::Stonecutter => f.write_str("stonecutter"),
        }
    }
}
