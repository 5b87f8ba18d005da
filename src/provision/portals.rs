//! Captive portal build
//!
//! Applies SSID general settings and external splash pages slot by slot.
//! Both are full-replace PUTs, so re-running is harmless.

use crate::error::Result;
use crate::inventory::PortalFile;
use crate::meraki::client::MerakiClient;
use crate::meraki::ssids::{update_splash_settings, update_ssid};

/// What a portal build did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalReport {
    pub ssids_updated: Vec<u8>,
    pub splash_updated: Vec<u8>,
}

/// Apply every slot in `portals` to the network
pub async fn apply_portals(client: &MerakiClient, net_id: &str, portals: &PortalFile) -> Result<PortalReport> {
    let mut report = PortalReport::default();

    for (&number, portal) in portals {
        tracing::info!("Updating SSID {} for {}", number, portal.ssid_body.name);
        update_ssid(client, net_id, number, &portal.ssid_body.to_json()).await?;
        report.ssids_updated.push(number);

        if let Some(splash) = portal.splash() {
            tracing::info!(
                "Update SSID {} excap to {}",
                number,
                portal.splash_url().unwrap_or("(no splash URL)")
            );
            update_splash_settings(client, net_id, number, &splash).await?;
            report.splash_updated.push(number);
        }
    }

    Ok(report)
}
