//! Declarative gui definitions
//!
//! A definition names the variant, its title and the panes of each component.
//! Merged variants list their panes directly. Named variants list children
//! tagged `component`, each with a name from the variant's fixed set. Any
//! violation fails the whole load.

use super::kind::{ComponentName, GuiFlags, GuiKind};
use super::merchant::MerchantRecipe;
use super::Gui;
use crate::component::InventoryComponent;
use crate::error::{malformed, GuiError, GuiResult};
use crate::inventory::ItemStack;
use crate::pane::{GuiItem, Pane, Priority};
use serde::Deserialize;

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    pub x: usize,
    pub y: usize,
    pub item: ItemStack,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaneDefinition {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    /// Put this item in every position no item claims
    #[serde(default)]
    pub fill: Option<ItemStack>,
    #[serde(default)]
    pub panes: Vec<PaneDefinition>,
}

impl PaneDefinition {
    fn build(&self) -> GuiResult<Pane> {
        let mut pane = Pane::new(self.x, self.y, self.width, self.height).with_priority(self.priority);
        pane.set_visible(self.visible);

        for item in &self.items {
            let mut gui_item = GuiItem::new(item.item.clone());
            gui_item.set_visible(item.visible);
            pane.add_item(gui_item, item.x, item.y)?;
        }

        if let Some(fill) = &self.fill {
            pane.fill_with(fill.clone(), None);
        }

        for child in &self.panes {
            pane.add_pane(child.build()?)?;
        }

        Ok(pane)
    }
}

/// A child element of a named gui
#[derive(Debug, Clone, Deserialize)]
pub struct ChildDefinition {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub panes: Vec<PaneDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuiDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Row count of chest guis
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub panes: Vec<PaneDefinition>,
    #[serde(default)]
    pub children: Vec<ChildDefinition>,
    #[serde(default)]
    pub trades: Vec<MerchantRecipe>,
}

fn parse_kind(name: &str, rows: Option<usize>) -> GuiResult<GuiKind> {
    let kind = match name {
        "chest" => GuiKind::chest(rows.ok_or_else(|| malformed("chest gui has no rows"))?)?,
        "barrel" => GuiKind::Barrel,
        "dropper" => GuiKind::Dropper,
        "hopper" => GuiKind::Hopper,
        "furnace" => GuiKind::Furnace,
        "blast-furnace" => GuiKind::BlastFurnace,
        "smoker" => GuiKind::Smoker,
        "brewing-stand" => GuiKind::BrewingStand,
        "crafting-table" => GuiKind::CraftingTable,
        "anvil" => GuiKind::Anvil,
        "beacon" => GuiKind::Beacon,
        "cartography-table" => GuiKind::CartographyTable,
        "enchanting-table" => GuiKind::EnchantingTable,
        "grindstone" => GuiKind::Grindstone,
        "merchant" => GuiKind::Merchant,
        "smithing-table" => GuiKind::SmithingTable,
        "legacy-smithing-table" => GuiKind::LegacySmithingTable,
        "stonecutter" => GuiKind::Stonecutter,
        other => return Err(malformed(format!("unknown gui type '{}'", other))),
    };

    Ok(kind)
}

fn add_panes(component: &mut InventoryComponent, panes: &[PaneDefinition]) -> GuiResult<()> {
    for pane in panes {
        pane.build()
            .and_then(|pane| component.add_pane(pane))
            .map_err(|error| match error {
                GuiError::PaneOutOfBounds { .. } => malformed(error),
                other => other,
            })?;
    }

    Ok(())
}

impl GuiDefinition {
    pub fn from_toml_str(source: &str) -> GuiResult<Self> {
        toml::from_str(source).map_err(malformed)
    }

    pub fn from_json_str(source: &str) -> GuiResult<Self> {
        serde_json::from_str(source).map_err(malformed)
    }

    /// Build the gui this definition describes
    pub fn build(&self) -> GuiResult<Gui> {
        let title = self
            .title
            .as_deref()
            .ok_or_else(|| malformed("gui does not have the mandatory title set"))?;

        let kind = parse_kind(&self.kind, self.rows)?;
        let mut gui = Gui::new(kind, title);

        if kind.flags().contains(GuiFlags::MERGED) {
            if !self.children.is_empty() {
                return Err(malformed(format!("{} gui cannot contain components", kind)));
            }

            if let Some(component) = gui.inventory_component() {
                add_panes(component, &self.panes)?;
            }
        } else {
            if !self.panes.is_empty() {
                return Err(malformed("gui element contains non-component tags"));
            }

            for child in &self.children {
                if !child.tag.eq_ignore_ascii_case("component") {
                    return Err(malformed("gui element contains non-component tags"));
                }

                let name: ComponentName = child
                    .name
                    .as_deref()
                    .ok_or_else(|| malformed("component tag does not have a name specified"))?
                    .parse()?;

                let component = gui
                    .component_mut(name)
                    .ok_or_else(|| malformed(format!("unknown component name '{}' for {} gui", name, kind)))?;

                add_panes(component, &child.panes)?;
            }
        }

        if !self.trades.is_empty() {
            if kind != GuiKind::Merchant {
                return Err(malformed(format!("{} gui cannot have trades", kind)));
            }

            for trade in &self.trades {
                gui.add_trade(trade.clone(), 0);
            }
        }

        Ok(gui)
    }
}
