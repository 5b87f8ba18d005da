//! mprov - provision Meraki organizations from declarative files
//!
//! The binary in `main.rs` is a thin CLI over the runs in [`provision`];
//! everything here can be driven against any dashboard-compatible base URL.

pub mod config;
pub mod error;
pub mod inventory;
pub mod meraki;
pub mod poll;
pub mod provision;
pub mod resolver;
