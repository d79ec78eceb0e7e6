/// Version Specific Container Backends
///
/// Devices such as anvils and merchants cannot be created through the host's
/// plain inventory API. Each supported version ships a backend that builds
/// them. Backends come in two structurally different families, split at
/// 1.20.5 where trade costs stopped being whole item stacks.

pub mod cost_based;
pub mod stack_based;

pub use cost_based::CostBasedBackend;
pub use stack_based::StackBasedBackend;

use crate::error::{GuiError, GuiResult};
use crate::gui::{GuiHandle, MerchantRecipe};
use crate::host::{Host, InventoryId, InventoryType, MerchantOffer, MerchantOffers, OfferCost, ViewerId};
use crate::inventory::ItemStack;
use crate::version::{BackendDescriptor, BackendFamily, Capability, Version, VersionMatcher};
use std::fmt;
use std::sync::Arc;

/// A backend able to create one kind of device inventory
pub trait ContainerInventory: fmt::Debug + Send + Sync {
    fn descriptor(&self) -> BackendDescriptor;

    /// Create the device inventory on the host
    fn create_inventory(
        &self,
        host: &mut Host,
        title: &str,
        holder: Option<GuiHandle>,
    ) -> GuiResult<InventoryId> {
        create_device_inventory(self.descriptor(), host, title, holder)
    }
}

pub trait AnvilInventory: ContainerInventory {
    /// Text the viewer typed into the rename field
    fn rename_text(&self, host: &Host, inventory: InventoryId) -> Option<String> {
        host.inventory(inventory).and_then(|inventory| inventory.rename_text.clone())
    }
}

pub trait MerchantInventory: ContainerInventory {
    /// Encode a single trade for this version
    fn encode_cost(&self, item: &ItemStack) -> OfferCost;

    /// Send the trade list to the viewer's open merchant screen.
    /// Each trade is paired with its special price difference.
    fn send_merchant_offers(
        &self,
        host: &mut Host,
        viewer: ViewerId,
        trades: &[(MerchantRecipe, i32)],
        level: u32,
        experience: u32,
    ) -> GuiResult<()> {
        let offers = trades
            .iter()
            .map(|(recipe, discount)| self.encode_offer(recipe, *discount))
            .collect::<GuiResult<Vec<_>>>()?;

        let entity = host.entity_or_err(viewer)?;

        if !entity.is_player {
            return Err(GuiError::InvalidViewer {
                viewer,
                reason: "merchant offers can only be sent to players".to_string(),
            });
        }

        let Some(inventory) = entity.open_inventory else {
            return Err(GuiError::InvalidViewer {
                viewer,
                reason: "no merchant screen open".to_string(),
            });
        };

        log::debug!(
            "[MerchantInventory::send_merchant_offers] Sending {} offers to {} ({:?})",
            offers.len(),
            viewer,
            self.descriptor().family
        );

        entity.merchant_offers = Some(MerchantOffers {
            inventory,
            offers,
            level,
            experience,
        });

        Ok(())
    }

    fn encode_offer(&self, recipe: &MerchantRecipe, discount: i32) -> GuiResult<MerchantOffer> {
        let mut ingredients = recipe.ingredients.iter();

        let Some(first) = ingredients.next() else {
            return Err(GuiError::InvalidTrade {
                reason: "merchant recipe has no ingredients".to_string(),
            });
        };

        Ok(MerchantOffer {
            first_cost: self.encode_cost(first),
            second_cost: ingredients.next().map(|item| self.encode_cost(item)),
            result: recipe.result.clone(),
            uses: recipe.uses,
            max_uses: recipe.max_uses,
            experience: recipe.villager_experience,
            price_multiplier: recipe.price_multiplier,
            special_price: discount,
        })
    }
}

fn inventory_type(capability: Capability) -> InventoryType {
    match capability {
        Capability::Anvil => InventoryType::Anvil,
        Capability::Beacon => InventoryType::Beacon,
        Capability::CartographyTable => InventoryType::Cartography,
        Capability::EnchantingTable => InventoryType::EnchantingTable,
        Capability::Grindstone => InventoryType::Grindstone,
        Capability::Merchant => InventoryType::Merchant,
        Capability::SmithingTable => InventoryType::SmithingTable,
        Capability::LegacySmithingTable => InventoryType::LegacySmithingTable,
        Capability::Stonecutter => InventoryType::Stonecutter,
    }
}

/// Shared by both families: a backend only works on the version it was built for
fn create_device_inventory(
    descriptor: BackendDescriptor,
    host: &mut Host,
    title: &str,
    holder: Option<GuiHandle>,
) -> GuiResult<InventoryId> {
    if host.version() != descriptor.version {
        return Err(GuiError::Instantiation {
            capability: descriptor.capability,
            reason: format!(
                "backend for {} cannot run on {}",
                descriptor.version,
                host.version()
            ),
        });
    }

    let kind = inventory_type(descriptor.capability);
    let id = host.create_inventory(kind, kind.default_size(), title, holder);
    host.inventory_or_err(id)?.backend = Some(descriptor);

    Ok(id)
}

pub(crate) fn container(descriptor: BackendDescriptor) -> Arc<dyn ContainerInventory> {
    match descriptor.family {
        BackendFamily::StackBased => Arc::new(StackBasedBackend::new(descriptor)),
        BackendFamily::CostBased => Arc::new(CostBasedBackend::new(descriptor)),
    }
}

pub(crate) fn anvil(descriptor: BackendDescriptor) -> Arc<dyn AnvilInventory> {
    match descriptor.family {
        BackendFamily::StackBased => Arc::new(StackBasedBackend::new(descriptor)),
        BackendFamily::CostBased => Arc::new(CostBasedBackend::new(descriptor)),
    }
}

pub(crate) fn merchant(descriptor: BackendDescriptor) -> Arc<dyn MerchantInventory> {
    match descriptor.family {
        BackendFamily::StackBased => Arc::new(StackBasedBackend::new(descriptor)),
        BackendFamily::CostBased => Arc::new(CostBasedBackend::new(descriptor)),
    }
}

/// The backend a gui holds, typed by what the gui needs from it
#[derive(Debug, Clone)]
pub enum GuiBackend {
    Container(Arc<dyn ContainerInventory>),
    Anvil(Arc<dyn AnvilInventory>),
    Merchant(Arc<dyn MerchantInventory>),
}

impl GuiBackend {
    pub fn resolve(capability: Capability, version: Version) -> GuiResult<Self> {
        let backend = match capability {
            Capability::Anvil => GuiBackend::Anvil(VersionMatcher::new_anvil_inventory(version)?),
            Capability::Merchant => GuiBackend::Merchant(VersionMatcher::new_merchant_inventory(version)?),
            Capability::Beacon => GuiBackend::Container(VersionMatcher::new_beacon_inventory(version)?),
            Capability::CartographyTable => {
                GuiBackend::Container(VersionMatcher::new_cartography_table_inventory(version)?)
            }
            Capability::EnchantingTable => {
                GuiBackend::Container(VersionMatcher::new_enchanting_table_inventory(version)?)
            }
            Capability::Grindstone => GuiBackend::Container(VersionMatcher::new_grindstone_inventory(version)?),
            Capability::SmithingTable => {
                GuiBackend::Container(VersionMatcher::new_smithing_table_inventory(version)?)
            }
            Capability::LegacySmithingTable => {
                GuiBackend::Container(VersionMatcher::new_legacy_smithing_table_inventory(version)?)
            }
            Capability::Stonecutter => GuiBackend::Container(VersionMatcher::new_stonecutter_inventory(version)?),
        };

        Ok(backend)
    }

    pub fn descriptor(&self) -> BackendDescriptor {
        match self {
            GuiBackend::Container(backend) => backend.descriptor(),
            GuiBackend::Anvil(backend) => backend.descriptor(),
            GuiBackend::Merchant(backend) => backend.descriptor(),
        }
    }

    pub fn create_inventory(
        &self,
        host: &mut Host,
        title: &str,
        holder: Option<GuiHandle>,
    ) -> GuiResult<InventoryId> {
        match self {
            GuiBackend::Container(backend) => backend.create_inventory(host, title, holder),
            GuiBackend::Anvil(backend) => backend.create_inventory(host, title, holder),
            GuiBackend::Merchant(backend) => backend.create_inventory(host, title, holder),
        }
    }
}
