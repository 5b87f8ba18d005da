//! Meraki Cameras
//!
//! Live video links and snapshot generation for MV cameras. Snapshot images
//! are served from a separate host that needs no API key, so they are
//! fetched with their own plain HTTP client.

use super::client::{decode, segment, MerakiClient};
use super::http::{sanitize_for_log, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::{ProvisionError, Result};
use crate::poll::{poll_until, PollPolicy, PollStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Link to the live video of a camera (requires a dashboard login to view)
#[derive(Debug, Clone, Deserialize)]
pub struct VideoLink {
    pub url: String,
}

/// Reference to a generated snapshot image
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub url: String,
    #[serde(default)]
    pub expiry: Option<String>,
}

fn camera_path(net_id: &str, serial: &str) -> String {
    format!("networks/{}/cameras/{}", segment(net_id), segment(serial))
}

/// Get the live video link for a camera
pub async fn get_video_link(client: &MerakiClient, net_id: &str, serial: &str) -> Result<VideoLink> {
    client
        .get_as(&format!("{}/videoLink", camera_path(net_id, serial)))
        .await
}

/// Generate a snapshot at `timestamp`, or now when none is given
pub async fn generate_snapshot(
    client: &MerakiClient,
    net_id: &str,
    serial: &str,
    timestamp: Option<DateTime<Utc>>,
) -> Result<Snapshot> {
    let path = format!("{}/snapshot", camera_path(net_id, serial));
    let query: Vec<(&str, String)> = timestamp
        .map(|ts| vec![("timestamp", ts.to_rfc3339_opts(SecondsFormat::Secs, true))])
        .unwrap_or_default();

    let snapshot = client.post_with_query(&path, &query, None).await?;
    decode(&path, snapshot)
}

/// Plain HTTP client for snapshot images
#[derive(Clone)]
pub struct SnapshotFetcher {
    client: Client,
}

impl SnapshotFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// One readiness check: the image host answers 404 (or 202) until the
    /// snapshot has been uploaded
    pub async fn check(&self, url: &str) -> Result<PollStatus<Vec<u8>>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::ACCEPTED {
            return Ok(PollStatus::Pending);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Snapshot fetch error: {} - {}", status, sanitize_for_log(&body));
            return Err(ProvisionError::Api {
                status: status.as_u16(),
                method: "GET",
                url: url.to_string(),
                message: sanitize_for_log(&body),
            });
        }

        Ok(PollStatus::Ready(response.bytes().await?.to_vec()))
    }

    /// Wait until the snapshot at `url` is available and return its bytes
    pub async fn wait_for_image(&self, url: &str, policy: &PollPolicy) -> Result<Vec<u8>> {
        poll_until("snapshot", policy, || self.check(url)).await
    }
}
