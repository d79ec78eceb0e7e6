//! Version to backend lookup
//!
//! One table per capability lists exactly the versions that ship a backend
//! for it. Resolution never falls back to a neighbouring version: a missing
//! entry is reported to the caller.

use super::{Capability, Version};
use crate::backend::{
    self, AnvilInventory, ContainerInventory, MerchantInventory,
};
use crate::error::{GuiError, GuiResult};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use Version::*;

/// Structurally distinct backend implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendFamily {
    /// Trade costs are whole item stacks (before 1.20.5)
    StackBased,
    /// Trade costs are item id and count (1.20.5 onwards)
    CostBased,
}

impl BackendFamily {
    fn for_version(version: Version) -> Self {
        if version >= V1_20_5 {
            BackendFamily::CostBased
        } else {
            BackendFamily::StackBased
        }
    }
}

/// A registry entry: which backend drives `capability` on `version`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendDescriptor {
    pub capability: Capability,
    pub version: Version,
    pub family: BackendFamily,
}

const ALL_VERSIONS: &[Version] = &Version::ALL;

const SMITHING_TABLE_VERSIONS: &[Version] = &[
    V1_19_4, V1_20_0, V1_20_1, V1_20_2, V1_20_3_4, V1_20_5, V1_20_6, V1_21_0, V1_21_1, V1_21_2_3,
    V1_21_4, V1_21_5, V1_21_6_8,
];

const LEGACY_SMITHING_TABLE_VERSIONS: &[Version] = &[
    V1_16_1, V1_16_2_3, V1_16_4_5, V1_17_0, V1_17_1, V1_18_0, V1_18_1, V1_18_2, V1_19_0, V1_19_1,
    V1_19_2, V1_19_3, V1_19_4,
];

fn table(capability: Capability) -> &'static [Version] {
    match capability {
        Capability::Anvil
        | Capability::Beacon
        | Capability::CartographyTable
        | Capability::EnchantingTable
        | Capability::Grindstone
        | Capability::Merchant
        | Capability::Stonecutter => ALL_VERSIONS,
        Capability::SmithingTable => SMITHING_TABLE_VERSIONS,
        Capability::LegacySmithingTable => LEGACY_SMITHING_TABLE_VERSIONS,
    }
}

lazy_static::lazy_static! {
    static ref REGISTRY: FxHashMap<(Capability, Version), BackendDescriptor> = {
        let mut registry = FxHashMap::default();

        for capability in Capability::ALL {
            for &version in table(capability) {
                registry.insert(
                    (capability, version),
                    BackendDescriptor {
                        capability,
                        version,
                        family: BackendFamily::for_version(version),
                    },
                );
            }
        }

        registry
    };
}

/// Resolves and instantiates version specific backends
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionMatcher;

impl VersionMatcher {
    /// Look up the backend for `capability` on exactly `version`.
    ///
    /// Smithing tables are checked in two steps: first whether the version has
    /// any smithing table at all, then whether it has the requested form.
    pub fn resolve(capability: Capability, version: Version) -> GuiResult<BackendDescriptor> {
        if capability.is_smithing_table() {
            if !version.exists_smithing_table() {
                return Err(GuiError::CapabilityMissing { capability, version });
            }

            let form_exists = match capability {
                Capability::SmithingTable => version.exists_modern_smithing_table(),
                _ => version.exists_legacy_smithing_table(),
            };

            if !form_exists {
                return Err(GuiError::SubformMissing { capability, version });
            }
        }

        REGISTRY
            .get(&(capability, version))
            .copied()
            .ok_or(GuiError::CapabilityMissing { capability, version })
    }

    /// Versions with a registered backend for `capability`, oldest first
    pub fn supported_versions(capability: Capability) -> Vec<Version> {
        let mut versions: Vec<Version> = REGISTRY
            .keys()
            .filter(|(c, _)| *c == capability)
            .map(|(_, v)| *v)
            .collect();
        versions.sort();
        versions
    }

    pub fn new_anvil_inventory(version: Version) -> GuiResult<Arc<dyn AnvilInventory>> {
        let descriptor = Self::resolve(Capability::Anvil, version)?;
        Ok(backend::anvil(descriptor))
    }

    pub fn new_beacon_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::Beacon, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_cartography_table_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::CartographyTable, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_enchanting_table_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::EnchantingTable, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_grindstone_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::Grindstone, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_merchant_inventory(version: Version) -> GuiResult<Arc<dyn MerchantInventory>> {
        let descriptor = Self::resolve(Capability::Merchant, version)?;
        Ok(backend::merchant(descriptor))
    }

    /// Smithing table with a template slot
    pub fn new_smithing_table_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::SmithingTable, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_legacy_smithing_table_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::LegacySmithingTable, version)?;
        Ok(backend::container(descriptor))
    }

    pub fn new_stonecutter_inventory(version: Version) -> GuiResult<Arc<dyn ContainerInventory>> {
        let descriptor = Self::resolve(Capability::Stonecutter, version)?;
        Ok(backend::container(descriptor))
    }
}
