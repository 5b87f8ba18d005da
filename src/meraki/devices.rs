//! Meraki Devices
//!
//! Claiming devices into a network and updating their attributes.

use super::client::{decode, segment, MerakiClient};
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;

/// Device information as returned by the network device endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Device {
    /// MV-series models are cameras
    pub fn is_camera(&self) -> bool {
        self.model
            .as_deref()
            .map(|m| m.to_ascii_uppercase().starts_with("MV"))
            .unwrap_or(false)
    }
}

/// List the devices in a network
pub async fn list_devices(client: &MerakiClient, net_id: &str) -> Result<Vec<Device>> {
    client
        .get_as(&format!("networks/{}/devices", segment(net_id)))
        .await
}

/// Claim a device into a network. The claim body carries the serial;
/// the dashboard answers with no useful body.
pub async fn claim_device(client: &MerakiClient, net_id: &str, body: &Value) -> Result<()> {
    client
        .post(&format!("networks/{}/devices/claim", segment(net_id)), Some(body))
        .await?;
    Ok(())
}

/// Update a claimed device and return its state after the update
pub async fn update_device(client: &MerakiClient, net_id: &str, serial: &str, body: &Value) -> Result<Device> {
    let path = format!("networks/{}/devices/{}", segment(net_id), segment(serial));
    let updated = client.put(&path, body).await?;
    decode(&path, updated)
}
