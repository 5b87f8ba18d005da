//! Declarative input files
//!
//! Networks, portals and webhooks to provision are read from JSON (or YAML
//! when the file ends in `.yaml`/`.yml`). Fields the tool does not need to
//! look at are kept in `extra` and sent to the dashboard unchanged.

use crate::error::{ProvisionError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Default file names, relative to the working directory
pub const NETWORKS_FILE: &str = "add_networks.json";
pub const PORTALS_FILE: &str = "add_portals.json";
pub const WEBHOOKS_FILE: &str = "add_webhooks.json";

fn object_with(extra: &Map<String, Value>, key: &str, value: &str) -> Value {
    let mut body = extra.clone();
    body.insert(key.to_string(), Value::String(value.to_string()));
    Value::Object(body)
}

/// One network to create, with the devices to claim into it
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSpec {
    pub body: NetworkBody,
    #[serde(default)]
    pub devices: Vec<DeviceSpec>,
}

/// Network create body; `name` is the natural key
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkBody {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkBody {
    pub fn to_json(&self) -> Value {
        object_with(&self.extra, "name", &self.name)
    }
}

/// A device claim followed by the update that names it
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSpec {
    pub add: ClaimBody,
    pub update: DeviceUpdate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimBody {
    pub serial: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimBody {
    pub fn to_json(&self) -> Value {
        object_with(&self.extra, "serial", &self.serial)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceUpdate {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceUpdate {
    pub fn to_json(&self) -> Value {
        object_with(&self.extra, "name", &self.name)
    }
}

/// SSID slot number → settings for that slot
pub type PortalFile = BTreeMap<u8, PortalSpec>;

#[derive(Debug, Clone, Deserialize)]
pub struct PortalSpec {
    pub ssid_body: SsidBody,
    #[serde(default)]
    pub splash_body: Option<Map<String, Value>>,
}

impl PortalSpec {
    /// Splash settings to apply; null and `{}` both mean "leave alone"
    pub fn splash(&self) -> Option<Value> {
        self.splash_body
            .as_ref()
            .filter(|body| !body.is_empty())
            .map(|body| Value::Object(body.clone()))
    }

    pub fn splash_url(&self) -> Option<&str> {
        self.splash_body.as_ref()?.get("splashUrl")?.as_str()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SsidBody {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SsidBody {
    pub fn to_json(&self) -> Value {
        object_with(&self.extra, "name", &self.name)
    }
}

/// A webhook receiver to register; `(name, url)` is the natural key
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSpec {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookSpec {
    pub fn to_json(&self) -> Value {
        let mut body = self.extra.clone();
        body.insert("name".to_string(), Value::String(self.name.clone()));
        body.insert("url".to_string(), Value::String(self.url.clone()));
        Value::Object(body)
    }

    /// Receivers must be reachable over TLS
    pub fn is_https(&self) -> bool {
        url::Url::parse(&self.url)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("yaml") | Some("yml")
    )
}

/// Parse file contents, choosing YAML or JSON from the path's extension
pub fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    let parsed = if is_yaml(path) {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ProvisionError::Inventory {
        path: path.to_path_buf(),
        message,
    })
}

/// Read and parse an input file
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| ProvisionError::Inventory {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(path, &content)
}
