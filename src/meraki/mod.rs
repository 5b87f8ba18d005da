//! Meraki dashboard API interaction module
//!
//! This module provides the calls the provisioning runs are built from:
//! the authenticated HTTP session plus one file per dashboard resource.
//!
//! # Module Structure
//!
//! - [`client`] - Main client, owns the session and the base URL
//! - [`http`] - HTTP utilities for REST calls and error mapping
//! - [`orgs`] - Organization listing and name resolution
//! - [`networks`] - Network listing, creation and name resolution
//! - [`devices`] - Device claim, update and listing
//! - [`ssids`] - SSID and splash page updates
//! - [`webhooks`] - Webhook receivers and test deliveries
//! - [`cameras`] - Video links and snapshots
//!
//! # Example
//!
//! ```ignore
//! use mprov::meraki::{client::MerakiClient, orgs};
//!
//! async fn example() -> mprov::error::Result<()> {
//!     let client = MerakiClient::new("https://api.meraki.com/api/v0", "api-key")?;
//!     let org_id = orgs::resolve_org_id(&client, "Acme").await?;
//!     Ok(())
//! }
//! ```

pub mod cameras;
pub mod client;
pub mod devices;
pub mod http;
pub mod networks;
pub mod orgs;
pub mod serde_helpers;
pub mod ssids;
pub mod webhooks;
