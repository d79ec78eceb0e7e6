/// Server Version Identification
///
/// The host's internal object model changes shape between releases, so every
/// release line the toolkit supports gets its own identifier. Backends are
/// picked by exact identifier, never by probing the running server.

pub mod capability;
pub mod matcher;

pub use capability::Capability;
pub use matcher::{BackendDescriptor, BackendFamily, VersionMatcher};

use crate::error::{GuiError, GuiResult};
use std::fmt;

/// Every server version line with a dedicated set of backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    V1_16_1,
    V1_16_2_3,
    V1_16_4_5,
    V1_17_0,
    V1_17_1,
    V1_18_0,
    V1_18_1,
    V1_18_2,
    V1_19_0,
    V1_19_1,
    V1_19_2,
    V1_19_3,
    V1_19_4,
    V1_20_0,
    V1_20_1,
    V1_20_2,
    V1_20_3_4,
    V1_20_5,
    V1_20_6,
    V1_21_0,
    V1_21_1,
    V1_21_2_3,
    V1_21_4,
    V1_21_5,
    V1_21_6_8,
}

impl Version {
    /// All supported versions, oldest first
    pub const ALL: [Version; 25] = [
        Version::V1_16_1,
        Version::V1_16_2_3,
        Version::V1_16_4_5,
        Version::V1_17_0,
        Version::V1_17_1,
        Version::V1_18_0,
        Version::V1_18_1,
        Version::V1_18_2,
        Version::V1_19_0,
        Version::V1_19_1,
        Version::V1_19_2,
        Version::V1_19_3,
        Version::V1_19_4,
        Version::V1_20_0,
        Version::V1_20_1,
        Version::V1_20_2,
        Version::V1_20_3_4,
        Version::V1_20_5,
        Version::V1_20_6,
        Version::V1_21_0,
        Version::V1_21_1,
        Version::V1_21_2_3,
        Version::V1_21_4,
        Version::V1_21_5,
        Version::V1_21_6_8,
    ];

    /// Map a server version string such as `1.20.4` or `1.20.4-R0.1-SNAPSHOT`
    /// to its version line.
    pub fn from_server_version(raw: &str) -> GuiResult<Version> {
        let release = raw.split('-').next().unwrap_or(raw).trim();

        let version = match release {
            "1.16.1" => Version::V1_16_1,
            "1.16.2" | "1.16.3" => Version::V1_16_2_3,
            "1.16.4" | "1.16.5" => Version::V1_16_4_5,
            "1.17" | "1.17.0" => Version::V1_17_0,
            "1.17.1" => Version::V1_17_1,
            "1.18" | "1.18.0" => Version::V1_18_0,
            "1.18.1" => Version::V1_18_1,
            "1.18.2" => Version::V1_18_2,
            "1.19" | "1.19.0" => Version::V1_19_0,
            "1.19.1" => Version::V1_19_1,
            "1.19.2" => Version::V1_19_2,
            "1.19.3" => Version::V1_19_3,
            "1.19.4" => Version::V1_19_4,
            "1.20" | "1.20.0" => Version::V1_20_0,
            "1.20.1" => Version::V1_20_1,
            "1.20.2" => Version::V1_20_2,
            "1.20.3" | "1.20.4" => Version::V1_20_3_4,
            "1.20.5" => Version::V1_20_5,
            "1.20.6" => Version::V1_20_6,
            "1.21" | "1.21.0" => Version::V1_21_0,
            "1.21.1" => Version::V1_21_1,
            "1.21.2" | "1.21.3" => Version::V1_21_2_3,
            "1.21.4" => Version::V1_21_4,
            "1.21.5" => Version::V1_21_5,
            "1.21.6" | "1.21.7" | "1.21.8" => Version::V1_21_6_8,
            _ => {
                return Err(GuiError::UnsupportedVersion {
                    version: raw.to_string(),
                })
            }
        };

        Ok(version)
    }

    /// Whether the smithing table with a template slot exists
    pub fn exists_modern_smithing_table(self) -> bool {
        self >= Version::V1_19_4
    }

    /// Whether the two-input smithing table exists. 1.19.4 ships both forms.
    pub fn exists_legacy_smithing_table(self) -> bool {
        self <= Version::V1_19_4
    }

    /// Whether any form of smithing table exists
    pub fn exists_smithing_table(self) -> bool {
        self.exists_modern_smithing_table() || self.exists_legacy_smithing_table()
    }

    /// Whether `capability` is documented as available in this version
    pub fn supports(self, capability: Capability) -> bool {
        match capability {
            Capability::SmithingTable => self.exists_modern_smithing_table(),
            Capability::LegacySmithingTable => self.exists_legacy_smithing_table(),
            _ => true,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Version::V1_16_1 => "1.16.1",
            Version::V1_16_2_3 => "1.16.2-3",
            Version::V1_16_4_5 => "1.16.4-5",
            Version::V1_17_0 => "1.17",
            Version::V1_17_1 => "1.17.1",
            Version::V1_18_0 => "1.18",
            Version::V1_18_1 => "1.18.1",
            Version::V1_18_2 => "1.18.2",
            Version::V1_19_0 => "1.19",
            Version::V1_19_1 => "1.19.1",
            Version::V1_19_2 => "1.19.2",
            Version::V1_19_3 => "1.19.3",
            Version::V1_19_4 => "1.19.4",
            Version::V1_20_0 => "1.20",
            Version::V1_20_1 => "1.20.1",
            Version::V1_20_2 => "1.20.2",
            Version::V1_20_3_4 => "1.20.3-4",
            Version::V1_20_5 => "1.20.5",
            Version::V1_20_6 => "1.20.6",
            Version::V1_21_0 => "1.21",
            Version::V1_21_1 => "1.21.1",
            Version::V1_21_2_3 => "1.21.2-3",
            Version::V1_21_4 => "1.21.4",
            Version::V1_21_5 => "1.21.5",
            Version::V1_21_6_8 => "1.21.6-8",
        };

        f.write_str(name)
    }
}
