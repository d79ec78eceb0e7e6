//! Error handling for the gui toolkit
//!
//! Every fallible operation returns [`GuiResult`]. Errors propagate to the
//! immediate caller; nothing here is retried automatically.

use crate::host::{InventoryId, ViewerId};
use crate::version::{Capability, Version};

/// Result alias used throughout the crate
pub type GuiResult<T> = Result<T, GuiError>;

/// All errors raised by the toolkit
#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("Unsupported server version: {version}")]
    UnsupportedVersion { version: String },

    #[error("{capability} does not exist in version {version}")]
    CapabilityMissing { capability: Capability, version: Version },

    #[error("{capability} does not exist in this form in version {version}")]
    SubformMissing { capability: Capability, version: Version },

    #[error("Malformed gui definition: {reason}")]
    MalformedDefinition { reason: String },

    #[error("Failed to instantiate {capability} backend: {reason}")]
    Instantiation { capability: Capability, reason: String },

    #[error("Invalid merchant trade: {reason}")]
    InvalidTrade { reason: String },

    #[error("Pane of {width}x{height} at ({x}, {y}) does not fit in a {max_width}x{max_height} grid")]
    PaneOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },

    #[error("Viewer not found: {0}")]
    ViewerNotFound(ViewerId),

    #[error("Inventory not found: {0}")]
    InventoryNotFound(InventoryId),

    #[error("Viewer {0} does not have a cached inventory")]
    ViewerNotCached(ViewerId),

    #[error("Invalid viewer {viewer}: {reason}")]
    InvalidViewer { viewer: ViewerId, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Create a malformed definition error
pub fn malformed(reason: impl std::fmt::Display) -> GuiError {
    GuiError::MalformedDefinition {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_capability_and_version() {
        let error = GuiError::SubformMissing {
            capability: Capability::SmithingTable,
            version: Version::V1_16_1,
        };

        assert_eq!(
            error.to_string(),
            "smithing table does not exist in this form in version 1.16.1"
        );
    }

    #[test]
    fn test_malformed_helper() {
        let error = malformed("missing title");
        assert!(matches!(error, GuiError::MalformedDefinition { ref reason } if reason == "missing title"));
    }
}
