//! Error types for provisioning runs.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that can occur while talking to the dashboard or applying a batch.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// No API key was supplied on the command line, environment or config.
    #[error("No Meraki API key configured. Set MERAKI_DASHBOARD_API_KEY or use --api-key")]
    MissingApiKey,

    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,

    /// The configured base URL cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the dashboard or the snapshot host.
    #[error("API error ({status}) on {method} {url}: {message}")]
    Api {
        status: u16,
        method: &'static str,
        url: String,
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Could not find organization {0}")]
    OrganizationNotFound(String),

    #[error("Could not find network {name} in organization {org}")]
    NetworkNotFound { org: String, name: String },

    /// The device update response reported a different name than requested.
    #[error("Device name update failed for {serial}: requested {requested:?}, got {actual:?}")]
    DeviceRenameMismatch {
        serial: String,
        requested: String,
        actual: Option<String>,
    },

    #[error("webhook test for {url} was not enqueued: {status}")]
    WebhookTestNotEnqueued { url: String, status: String },

    #[error("webhook delivery to {url} failed: {status}")]
    WebhookDeliveryFailed { url: String, status: String },

    /// A poll loop ran out of time before reaching a terminal state.
    #[error("{label} did not complete within {timeout:?} ({attempts} attempts)")]
    PollTimeout {
        label: String,
        timeout: Duration,
        attempts: u32,
    },

    /// An inventory file could not be read or parsed.
    #[error("Failed to parse {}: {message}", .path.display())]
    Inventory { path: PathBuf, message: String },

    /// The settings file could not be read or parsed.
    #[error("Failed to load config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short operator hint for common dashboard failures.
    pub fn hint(&self) -> Option<&'static str> {
        match self.status()? {
            401 => Some("Authentication failed. Check your Meraki API key."),
            403 => Some("Permission denied. The API key lacks access to this organization."),
            404 => Some("Resource not found. The API key may not see this organization or network."),
            429 => Some("Rate limit exceeded. Please try again later."),
            400 => Some("Invalid request. Check the bodies in your input file."),
            500..=599 => Some("Meraki dashboard temporarily unavailable. Please try again."),
            _ => None,
        }
    }
}
