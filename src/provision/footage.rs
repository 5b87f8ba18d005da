//! Camera footage collection
//!
//! For every camera in a network: log its live video link, generate a
//! snapshot, wait for the image to become available and save it as
//! `<serial>.jpg`.

use crate::error::Result;
use crate::meraki::cameras::{generate_snapshot, get_video_link, SnapshotFetcher};
use crate::meraki::client::MerakiClient;
use crate::meraki::devices::list_devices;
use crate::poll::PollPolicy;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Collect a snapshot from every camera in the network into `out_dir`.
///
/// Only MV-series devices are cameras; anything else, including devices
/// that report no model, is skipped.
pub async fn collect_footage(
    client: &MerakiClient,
    fetcher: &SnapshotFetcher,
    net_id: &str,
    out_dir: &Path,
    timestamp: Option<DateTime<Utc>>,
    policy: &PollPolicy,
) -> Result<Vec<PathBuf>> {
    let (cameras, others): (Vec<_>, Vec<_>) = list_devices(client, net_id)
        .await?
        .into_iter()
        .partition(|d| d.is_camera());

    for device in &others {
        tracing::debug!(
            "Skipping {} (model {}): not a camera",
            device.serial,
            device.model.as_deref().unwrap_or("unknown")
        );
    }

    if cameras.is_empty() {
        tracing::warn!("No cameras found in network {}", net_id);
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(out_dir).await?;

    let mut saved = Vec::with_capacity(cameras.len());
    for camera in &cameras {
        let serial = &camera.serial;

        let video = get_video_link(client, net_id, serial).await?;
        tracing::info!("Video link for camera {}:\n{}", serial, video.url);

        let snapshot = generate_snapshot(client, net_id, serial, timestamp).await?;
        tracing::debug!("Snapshot for {} requested, expires {:?}", serial, snapshot.expiry);

        let image = fetcher.wait_for_image(&snapshot.url, policy).await?;

        let path = out_dir.join(format!("{serial}.jpg"));
        tokio::fs::write(&path, &image).await?;
        tracing::info!("Snapshot for camera {} saved to {}", serial, path.display());

        saved.push(path);
    }

    Ok(saved)
}
