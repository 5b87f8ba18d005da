//! Network build
//!
//! Creates the networks listed in the networks file, then claims and names
//! their devices. Networks that already exist are never re-created.

use crate::error::{ProvisionError, Result};
use crate::inventory::{DeviceSpec, NetworkSpec};
use crate::meraki::client::MerakiClient;
use crate::meraki::devices::{claim_device, update_device};
use crate::meraki::networks::{create_network, list_networks};
use crate::meraki::orgs::resolve_org_id;
use crate::resolver::find_id_by_name;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What to do when a network in the batch already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExistingNetworkPolicy {
    /// Stop processing the whole batch (nothing more to do)
    #[default]
    Stop,
    /// Leave the existing network alone and continue with the next one
    Skip,
}

/// What a network build did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkBuildReport {
    /// (name, id) of every network created
    pub created: Vec<(String, String)>,
    /// Existing networks passed over under the skip policy
    pub skipped: Vec<String>,
    /// Existing network that stopped the batch under the stop policy
    pub stopped_at: Option<String>,
    /// Serials claimed and named
    pub devices: Vec<String>,
}

/// Create the networks in `specs` inside `org_name`
pub async fn build_networks(
    client: &MerakiClient,
    org_name: &str,
    specs: &[NetworkSpec],
    policy: ExistingNetworkPolicy,
) -> Result<NetworkBuildReport> {
    let org_id = resolve_org_id(client, org_name).await?;
    let mut current = list_networks(client, &org_id).await?;
    let mut report = NetworkBuildReport::default();

    for spec in specs {
        let net_name = &spec.body.name;

        if let Some(net_id) = find_id_by_name(&current, net_name) {
            tracing::info!("Network {} already exists ({})", net_name, net_id);
            match policy {
                ExistingNetworkPolicy::Stop => {
                    report.stopped_at = Some(net_name.clone());
                    return Ok(report);
                }
                ExistingNetworkPolicy::Skip => {
                    report.skipped.push(net_name.clone());
                    continue;
                }
            }
        }

        let network = create_network(client, &org_id, &spec.body.to_json()).await?;
        tracing::info!("Created network {} with ID {}", net_name, network.id);

        let serials = provision_devices(client, &network.id, &spec.devices).await?;
        report.devices.extend(serials);
        report.created.push((net_name.clone(), network.id.clone()));

        // Later entries with the same name count as existing
        current.push(network);
    }

    Ok(report)
}

/// Claim each device into the network, then give it its display name.
///
/// The claim call does not accept a name, so a follow-up update sets it and
/// the update response must report the requested name.
pub async fn provision_devices(client: &MerakiClient, net_id: &str, devices: &[DeviceSpec]) -> Result<Vec<String>> {
    let mut serials = Vec::with_capacity(devices.len());

    for device in devices {
        let serial = &device.add.serial;

        claim_device(client, net_id, &device.add.to_json()).await?;
        tracing::info!("Device with SN {} added", serial);

        let updated = update_device(client, net_id, serial, &device.update.to_json()).await?;
        tracing::info!("Device with SN {} named {}", serial, device.update.name);

        if updated.name.as_deref() != Some(device.update.name.as_str()) {
            return Err(ProvisionError::DeviceRenameMismatch {
                serial: serial.clone(),
                requested: device.update.name.clone(),
                actual: updated.name,
            });
        }

        serials.push(serial.clone());
    }

    Ok(serials)
}
