//! Meraki SSIDs
//!
//! Full-replace updates of SSID slots and their splash page settings.

use super::client::{segment, MerakiClient};
use crate::error::Result;
use serde_json::Value;

fn ssid_path(net_id: &str, number: u8) -> String {
    format!("networks/{}/ssids/{}", segment(net_id), number)
}

/// Update the general settings of one SSID slot
pub async fn update_ssid(client: &MerakiClient, net_id: &str, number: u8, body: &Value) -> Result<Value> {
    client.put(&ssid_path(net_id, number), body).await
}

/// Update the splash page (captive portal) settings of one SSID slot
pub async fn update_splash_settings(client: &MerakiClient, net_id: &str, number: u8, body: &Value) -> Result<Value> {
    client
        .put(&format!("{}/splashSettings", ssid_path(net_id, number)), body)
        .await
}
