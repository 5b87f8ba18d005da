//! Meraki Networks
//!
//! Listing and creating networks inside an organization.

use super::client::{decode, segment, MerakiClient};
use super::orgs::resolve_org_id;
use crate::error::{ProvisionError, Result};
use crate::resolver::{find_id_by_name, Named};
use serde::Deserialize;
use serde_json::Value;

/// Network information
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
}

impl Named for Network {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// List all networks in an organization
pub async fn list_networks(client: &MerakiClient, org_id: &str) -> Result<Vec<Network>> {
    client
        .get_as(&format!("organizations/{}/networks", segment(org_id)))
        .await
}

/// Create a network from a full request body and return the created network
pub async fn create_network(client: &MerakiClient, org_id: &str, body: &Value) -> Result<Network> {
    let path = format!("organizations/{}/networks", segment(org_id));
    let created = client.post(&path, Some(body)).await?;
    decode(&path, created)
}

/// Resolve org name then network name to a network id; both must exist
pub async fn resolve_network_id(client: &MerakiClient, org_name: &str, net_name: &str) -> Result<String> {
    let org_id = resolve_org_id(client, org_name).await?;
    let networks = list_networks(client, &org_id).await?;

    let net_id = find_id_by_name(&networks, net_name)
        .ok_or_else(|| ProvisionError::NetworkNotFound {
            org: org_name.to_string(),
            name: net_name.to_string(),
        })?
        .to_string();

    tracing::info!("Found network {} with ID {}", net_name, net_id);
    Ok(net_id)
}
