//! Meraki Webhook Receivers
//!
//! HTTP servers registered on a network, and test deliveries to them.

use super::client::{decode, segment, MerakiClient};
use super::serde_helpers::id_from_string_or_number;
use crate::error::Result;
use serde::Deserialize;
use serde_json::{json, Value};

/// Status of a test delivery that has not been attempted yet
pub const STATUS_ENQUEUED: &str = "enqueued";
/// Status of a test delivery the receiver accepted
pub const STATUS_DELIVERED: &str = "delivered";

/// A registered webhook receiver
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServer {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
}

/// A webhook test delivery
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookTest {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub status: String,
}

impl WebhookTest {
    pub fn is_enqueued(&self) -> bool {
        self.status == STATUS_ENQUEUED
    }

    pub fn is_delivered(&self) -> bool {
        self.status == STATUS_DELIVERED
    }
}

fn servers_path(net_id: &str) -> String {
    format!("networks/{}/httpServers", segment(net_id))
}

/// List the webhook receivers on a network as raw JSON
pub async fn list_http_servers_raw(client: &MerakiClient, net_id: &str) -> Result<Value> {
    client.get(&servers_path(net_id)).await
}

/// List the webhook receivers on a network
pub async fn list_http_servers(client: &MerakiClient, net_id: &str) -> Result<Vec<HttpServer>> {
    let path = servers_path(net_id);
    decode(&path, client.get(&path).await?)
}

/// Register a webhook receiver from a full request body
pub async fn create_http_server(client: &MerakiClient, net_id: &str, body: &Value) -> Result<HttpServer> {
    let path = servers_path(net_id);
    let created = client.post(&path, Some(body)).await?;
    decode(&path, created)
}

/// Ask the dashboard to send a test webhook to `url`
pub async fn create_webhook_test(client: &MerakiClient, net_id: &str, url: &str) -> Result<WebhookTest> {
    let path = format!("{}/webhookTests", servers_path(net_id));
    let test = client.post(&path, Some(&json!({ "url": url }))).await?;
    decode(&path, test)
}

/// Fetch the current state of a test delivery
pub async fn get_webhook_test(client: &MerakiClient, net_id: &str, test_id: &str) -> Result<WebhookTest> {
    client
        .get_as(&format!("{}/webhookTests/{}", servers_path(net_id), segment(test_id)))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_test_status_helpers() {
        let test: WebhookTest =
            serde_json::from_str(r#"{"id": 1284392014819, "url": "https://example.com", "status": "enqueued"}"#).unwrap();
        assert_eq!(test.id, "1284392014819");
        assert!(test.is_enqueued());
        assert!(!test.is_delivered());
    }

    #[test]
    fn test_http_server_ignores_extra_fields() {
        let server: HttpServer = serde_json::from_str(
            r#"{"id": "aHR0cHM6", "name": "ops", "url": "https://hooks.example.com", "sharedSecret": "s"}"#,
        )
        .unwrap();
        assert_eq!(server.name, "ops");
        assert_eq!(server.id.as_deref(), Some("aHR0cHM6"));
    }
}
