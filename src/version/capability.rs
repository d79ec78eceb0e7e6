use std::fmt;

/// Container behaviors that need a version specific backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Anvil,
    Beacon,
    CartographyTable,
    EnchantingTable,
    Grindstone,
    Merchant,
    /// Smithing table with a template slot (1.19.4+)
    SmithingTable,
    /// Two-input smithing table (up to 1.19.4)
    LegacySmithingTable,
    Stonecutter,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::Anvil,
        Capability::Beacon,
        Capability::CartographyTable,
        Capability::EnchantingTable,
        Capability::Grindstone,
        Capability::Merchant,
        Capability::SmithingTable,
        Capability::LegacySmithingTable,
        Capability::Stonecutter,
    ];

    /// Both smithing capabilities are forms of one device
    pub fn is_smithing_table(self) -> bool {
        matches!(self, Capability::SmithingTable | Capability::LegacySmithingTable)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Anvil => "anvil",
            Capability::Beacon => "beacon",
            Capability::CartographyTable => "cartography table",
            Capability::EnchantingTable => "enchanting table",
            Capability::Grindstone => "grindstone",
            Capability::Merchant => "merchant",
            Capability::SmithingTable => "smithing table",
            Capability::LegacySmithingTable => "legacy smithing table",
            Capability::Stonecutter => "stonecutter",
        };

        f.write_str(name)
    }
}
