//! Webhook build
//!
//! Registers HTTPS webhook receivers that are not already present, then has
//! the dashboard send each one a test delivery and waits for the outcome.

use crate::error::{ProvisionError, Result};
use crate::inventory::WebhookSpec;
use crate::meraki::client::MerakiClient;
use crate::meraki::webhooks::{
    create_http_server, create_webhook_test, get_webhook_test, list_http_servers, HttpServer,
};
use crate::poll::{poll_until, PollPolicy, PollStatus};

/// What a webhook build did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    /// Receivers with a non-https URL; nothing was sent for them
    pub skipped: Vec<String>,
    pub delivered: Vec<String>,
}

fn already_registered(servers: &[HttpServer], spec: &WebhookSpec) -> bool {
    servers.iter().any(|s| s.name == spec.name && s.url == spec.url)
}

/// Register and test every receiver in `specs`
pub async fn register_webhooks(
    client: &MerakiClient,
    net_id: &str,
    specs: &[WebhookSpec],
    policy: &PollPolicy,
) -> Result<WebhookReport> {
    let mut servers = list_http_servers(client, net_id).await?;
    let mut report = WebhookReport::default();

    for spec in specs {
        tracing::info!("adding webhook '{}'", spec.name);

        if !spec.is_https() {
            tracing::warn!(" url is not 'https', skipping");
            report.skipped.push(spec.name.clone());
            continue;
        }

        if already_registered(&servers, spec) {
            tracing::info!(" webhook '{}' already registered for {}", spec.name, spec.url);
            report.existing.push(spec.name.clone());
        } else {
            let created = create_http_server(client, net_id, &spec.to_json()).await?;
            tracing::info!(
                " created webhook '{}' with ID {}",
                spec.name,
                created.id.as_deref().unwrap_or("-")
            );
            report.created.push(spec.name.clone());
            servers.push(created);
        }

        tracing::info!("testing webhook '{}'", spec.name);
        confirm_delivery(client, net_id, &spec.url, policy).await?;
        report.delivered.push(spec.name.clone());
    }

    Ok(report)
}

/// Trigger a test delivery to `url` and wait until it leaves the queue.
///
/// The test must start out `enqueued`; once it leaves that state, only
/// `delivered` counts as success.
pub async fn confirm_delivery(client: &MerakiClient, net_id: &str, url: &str, policy: &PollPolicy) -> Result<()> {
    let test = create_webhook_test(client, net_id, url).await?;

    if !test.is_enqueued() {
        return Err(ProvisionError::WebhookTestNotEnqueued {
            url: url.to_string(),
            status: test.status,
        });
    }

    let test_id = test.id.as_str();
    let label = format!("webhook test {test_id}");
    let finished = poll_until(&label, policy, || async move {
        let current = get_webhook_test(client, net_id, test_id).await?;
        Ok::<_, ProvisionError>(if current.is_enqueued() {
            PollStatus::Pending
        } else {
            PollStatus::Ready(current)
        })
    })
    .await?;

    if !finished.is_delivered() {
        return Err(ProvisionError::WebhookDeliveryFailed {
            url: url.to_string(),
            status: finished.status,
        });
    }

    tracing::info!("webhook test to {} delivered", url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_already_registered_matches_name_and_url() {
        let servers = vec![HttpServer {
            id: Some("1".to_string()),
            name: "ops".to_string(),
            url: "https://hooks.example.com".to_string(),
        }];
        let spec = |name: &str, url: &str| WebhookSpec {
            name: name.to_string(),
            url: url.to_string(),
            extra: Map::new(),
        };

        assert!(already_registered(&servers, &spec("ops", "https://hooks.example.com")));
        assert!(!already_registered(&servers, &spec("ops", "https://other.example.com")));
        assert!(!already_registered(&servers, &spec("dev", "https://hooks.example.com")));
    }
}
