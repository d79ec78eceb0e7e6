// Every documented (capability, version) pair resolves to its own backend

use anyhow::Result;
use inventory_gui::{
    BackendFamily, Capability, Gui, GuiError, GuiHandle, GuiKind, Host, InventoryType, Version, VersionMatcher,
};

#[test]
fn test_every_supported_pair_has_exact_entry() {
    for version in Version::ALL {
        for capability in Capability::ALL {
            let resolved = VersionMatcher::resolve(capability, version);

            if version.supports(capability) {
                let descriptor = resolved.unwrap_or_else(|e| panic!("{} on {}: {}", capability, version, e));
                assert_eq!(descriptor.capability, capability);
                assert_eq!(descriptor.version, version);
            } else {
                assert!(
                    matches!(
                        resolved,
                        Err(GuiError::SubformMissing { .. }) | Err(GuiError::CapabilityMissing { .. })
                    ),
                    "{} on {} should not resolve",
                    capability,
                    version
                );
            }
        }
    }
}

#[test]
fn test_supported_versions_match_availability() {
    for capability in Capability::ALL {
        let expected: Vec<Version> = Version::ALL
            .into_iter()
            .filter(|version| version.supports(capability))
            .collect();

        assert_eq!(VersionMatcher::supported_versions(capability), expected, "{}", capability);
    }
}

#[test]
fn test_smithing_forms_split_at_1_19_4() {
    assert!(VersionMatcher::resolve(Capability::SmithingTable, Version::V1_19_4).is_ok());
    assert!(VersionMatcher::resolve(Capability::LegacySmithingTable, Version::V1_19_4).is_ok());

    assert!(matches!(
        VersionMatcher::resolve(Capability::SmithingTable, Version::V1_19_3),
        Err(GuiError::SubformMissing { .. })
    ));
    assert!(matches!(
        VersionMatcher::resolve(Capability::LegacySmithingTable, Version::V1_20_0),
        Err(GuiError::SubformMissing { .. })
    ));
}

#[test]
fn test_server_version_strings() -> Result<()> {
    assert_eq!(Version::from_server_version("1.20.4")?, Version::V1_20_3_4);
    assert_eq!(Version::from_server_version("1.21.7-R0.1-SNAPSHOT")?, Version::V1_21_6_8);
    assert_eq!(Version::from_server_version("1.17")?, Version::V1_17_0);

    assert!(matches!(
        Version::from_server_version("1.15.2"),
        Err(GuiError::UnsupportedVersion { .. })
    ));
    Ok(())
}

#[test]
fn test_backend_families_follow_version() -> Result<()> {
    let old = VersionMatcher::resolve(Capability::Merchant, Version::V1_16_1)?;
    let new = VersionMatcher::resolve(Capability::Merchant, Version::V1_21_6_8)?;

    assert_eq!(old.family, BackendFamily::StackBased);
    assert_eq!(new.family, BackendFamily::CostBased);
    Ok(())
}

#[test]
fn test_typed_constructors_create_device_inventories() -> Result<()> {
    let mut host = Host::new(Version::V1_20_1);

    let anvil = VersionMatcher::new_anvil_inventory(Version::V1_20_1)?;
    let id = anvil.create_inventory(&mut host, "Repair", None)?;
    let inventory = host.inventory(id).expect("created");
    assert_eq!(inventory.kind, InventoryType::Anvil);
    assert_eq!(inventory.backend, Some(anvil.descriptor()));

    let grindstone = VersionMatcher::new_grindstone_inventory(Version::V1_20_1)?;
    let id = grindstone.create_inventory(&mut host, "Grind", None)?;
    assert_eq!(host.inventory(id).map(|i| i.kind), Some(InventoryType::Grindstone));

    // Backends refuse to run on a host of another version
    let stonecutter = VersionMatcher::new_stonecutter_inventory(Version::V1_21_4)?;
    assert!(matches!(
        stonecutter.create_inventory(&mut host, "Cut", None),
        Err(GuiError::Instantiation { .. })
    ));

    Ok(())
}

#[test]
fn test_gui_resolves_backend_from_host_version() -> Result<()> {
    let mut host = Host::new(Version::V1_19_2);
    let viewer = host.spawn_player("Alex");

    let gui = GuiHandle::new(Gui::new(GuiKind::LegacySmithingTable, "Smith"));
    gui.show(&mut host, viewer)?;

    let descriptor = gui.lock().backend().map(|b| b.descriptor());
    assert_eq!(descriptor.map(|d| d.version), Some(Version::V1_19_2));
    assert_eq!(descriptor.map(|d| d.capability), Some(Capability::LegacySmithingTable));

    let modern = GuiHandle::new(Gui::new(GuiKind::SmithingTable, "Smith"));
    assert!(matches!(
        modern.show(&mut host, viewer),
        Err(GuiError::SubformMissing { .. })
    ));

    Ok(())
}
