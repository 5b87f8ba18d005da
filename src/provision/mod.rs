//! Provisioning runs
//!
//! Each submodule is one end-to-end run behind a CLI subcommand. Runs are
//! strictly sequential and stop at the first error; nothing already applied
//! is rolled back.
//!
//! - [`networks`] - create networks, claim and name devices
//! - [`portals`] - SSID and splash page settings
//! - [`webhooks`] - register receivers and confirm test deliveries
//! - [`footage`] - camera video links and snapshots

pub mod footage;
pub mod networks;
pub mod portals;
pub mod webhooks;
