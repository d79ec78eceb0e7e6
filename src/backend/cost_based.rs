use super::{AnvilInventory, ContainerInventory, MerchantInventory};
use crate::host::OfferCost;
use crate::inventory::ItemStack;
use crate::version::BackendDescriptor;

/// Backends for 1.20.5 onwards. Trade costs are an item type with an amount
/// and the exact components the offered stack must carry.
#[derive(Debug, Clone, Copy)]
pub struct CostBasedBackend {
    descriptor: BackendDescriptor,
}

impl CostBasedBackend {
    pub fn new(descriptor: BackendDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ContainerInventory for CostBasedBackend {
    fn descriptor(&self) -> BackendDescriptor {
        self.descriptor
    }
}

impl AnvilInventory for CostBasedBackend {}

impl MerchantInventory for CostBasedBackend {
    fn encode_cost(&self, item: &ItemStack) -> OfferCost {
        OfferCost::Cost {
            item: item.item_id,
            count: item.count,
            display_name: item.display_name.clone(),
        }
    }
}
