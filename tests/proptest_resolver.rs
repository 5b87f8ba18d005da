//! Property-based tests using proptest
//!
//! These tests verify name resolution and inventory parsing using
//! randomized dashboard listings.

use mprov::inventory::{self, PortalFile};
use mprov::meraki::networks::Network;
use mprov::resolver::find_id_by_name;
use proptest::prelude::*;
use serde_json::json;
use std::path::Path;

/// Generate an arbitrary network listing entry
fn arb_network() -> impl Strategy<Value = Network> {
    (
        "[A-Za-z][A-Za-z0-9 -]{0,30}", // name
        "[LN]_[0-9]{6,12}",            // id
    )
        .prop_map(|(name, id)| Network { id, name })
}

/// Generate a network listing
fn arb_network_list() -> impl Strategy<Value = Vec<Network>> {
    prop::collection::vec(arb_network(), 0..50)
}

proptest! {
    /// Every listed name resolves to the id of its first occurrence
    #[test]
    fn listed_names_resolve_to_first_occurrence(networks in arb_network_list()) {
        for network in &networks {
            let first = networks.iter().find(|n| n.name == network.name).unwrap();
            prop_assert_eq!(find_id_by_name(&networks, &network.name), Some(first.id.as_str()));
        }
    }

    /// Names not in the listing never resolve
    #[test]
    fn unlisted_names_do_not_resolve(
        networks in arb_network_list(),
        name in "[A-Za-z0-9 -]{1,30}"
    ) {
        prop_assume!(networks.iter().all(|n| n.name != name));
        prop_assert_eq!(find_id_by_name(&networks, &name), None);
    }

    /// Matching is case-sensitive: a case-changed name only resolves if
    /// that exact spelling is also listed
    #[test]
    fn resolution_is_case_sensitive(networks in arb_network_list()) {
        for network in &networks {
            let upper = network.name.to_uppercase();
            let listed = networks.iter().any(|n| n.name == upper);
            prop_assert_eq!(find_id_by_name(&networks, &upper).is_some(), listed);
        }
    }

    /// Appending entries never changes what an already-listed name resolves to
    #[test]
    fn appending_keeps_resolution_stable(
        networks in arb_network_list(),
        extra in arb_network_list()
    ) {
        let mut combined = networks.clone();
        combined.extend(extra);

        for network in &networks {
            prop_assert_eq!(
                find_id_by_name(&combined, &network.name),
                find_id_by_name(&networks, &network.name)
            );
        }
    }
}

/// Tests for portal file parsing
mod portal_file_tests {
    use super::*;

    proptest! {
        /// Slots come back in ascending order and splash presence is preserved
        #[test]
        fn slots_are_sorted_and_splash_kept(
            slots in prop::collection::btree_map(0u8..15, any::<bool>(), 0..15)
        ) {
            let mut file = serde_json::Map::new();
            for (slot, has_splash) in &slots {
                let splash = if *has_splash {
                    json!({"splashUrl": format!("https://portal.example.com/{slot}")})
                } else {
                    serde_json::Value::Null
                };
                file.insert(
                    slot.to_string(),
                    json!({"ssid_body": {"name": format!("ssid-{slot}")}, "splash_body": splash}),
                );
            }

            let content = serde_json::Value::Object(file).to_string();
            let portals: PortalFile = inventory::parse(Path::new("add_portals.json"), &content).unwrap();

            prop_assert_eq!(portals.keys().copied().collect::<Vec<_>>(), slots.keys().copied().collect::<Vec<_>>());
            for (slot, has_splash) in &slots {
                prop_assert_eq!(portals[slot].splash().is_some(), *has_splash);
            }
        }
    }
}
