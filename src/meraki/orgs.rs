//! Meraki Organizations
//!
//! Listing organizations and resolving them by name.

use super::client::MerakiClient;
use super::serde_helpers::id_from_string_or_number;
use crate::error::{ProvisionError, Result};
use crate::resolver::{find_id_by_name, Named};
use serde::Deserialize;

/// Organization information
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
}

impl Named for Organization {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// List all organizations visible to the API key
pub async fn list_organizations(client: &MerakiClient) -> Result<Vec<Organization>> {
    client.get_as("organizations").await
}

/// Resolve an organization name to its id; a missing organization is fatal
pub async fn resolve_org_id(client: &MerakiClient, org_name: &str) -> Result<String> {
    let orgs = list_organizations(client).await?;

    let org_id = find_id_by_name(&orgs, org_name)
        .ok_or_else(|| ProvisionError::OrganizationNotFound(org_name.to_string()))?
        .to_string();

    tracing::info!("Found {} with ID {}", org_name, org_id);
    Ok(org_id)
}
