use super::{AnvilInventory, ContainerInventory, MerchantInventory};
use crate::host::OfferCost;
use crate::inventory::ItemStack;
use crate::version::BackendDescriptor;

/// Backends for versions before 1.20.5. Trade costs are full item stacks.
#[derive(Debug, Clone, Copy)]
pub struct StackBasedBackend {
    descriptor: BackendDescriptor,
}

impl StackBasedBackend {
    pub fn new(descriptor: BackendDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ContainerInventory for StackBasedBackend {
    fn descriptor(&self) -> BackendDescriptor {
        self.descriptor
    }
}

impl AnvilInventory for StackBasedBackend {}

impl MerchantInventory for StackBasedBackend {
    fn encode_cost(&self, item: &ItemStack) -> OfferCost {
        OfferCost::Stack(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::MerchantRecipe;
    use crate::inventory::ItemId;
    use crate::version::{Capability, Version, VersionMatcher};

    #[test]
    fn test_costs_are_stacks() {
        let descriptor = VersionMatcher::resolve(Capability::Merchant, Version::V1_18_2).expect("merchant exists");
        let backend = StackBasedBackend::new(descriptor);

        let recipe = MerchantRecipe::new(ItemStack::single(ItemId(1)), 3)
            .with_ingredient(ItemStack::new(ItemId(2), 5))
            .with_ingredient(ItemStack::new(ItemId(3), 1));

        let offer = backend.encode_offer(&recipe, -2).expect("recipe has ingredients");
        assert_eq!(offer.first_cost, OfferCost::Stack(ItemStack::new(ItemId(2), 5)));
        assert_eq!(offer.second_cost, Some(OfferCost::Stack(ItemStack::new(ItemId(3), 1))));
        assert_eq!(offer.special_price, -2);
        assert_eq!(offer.max_uses, 3);
    }
}
