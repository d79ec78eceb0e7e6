use super::container::{InventoryId, MerchantOffer};
use crate::inventory::{ItemStack, PlayerInventory};
use std::fmt;

/// Identifier of a human entity that can view inventories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// Trade list last sent to a viewer's open merchant screen
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantOffers {
    pub inventory: InventoryId,
    pub offers: Vec<MerchantOffer>,
    pub level: u32,
    pub experience: u32,
}

/// A player or other human entity
#[derive(Debug, Clone)]
pub struct HumanEntity {
    pub id: ViewerId,
    pub name: String,
    pub is_player: bool,
    pub inventory: PlayerInventory,
    pub cursor: Option<ItemStack>,
    pub open_inventory: Option<InventoryId>,
    pub merchant_offers: Option<MerchantOffers>,
}

impl HumanEntity {
    pub fn new(id: ViewerId, name: impl Into<String>, is_player: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_player,
            inventory: PlayerInventory::new(),
            cursor: None,
            open_inventory: None,
            merchant_offers: None,
        }
    }
}
