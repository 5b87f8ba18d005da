//! Meraki Client
//!
//! Main client for the dashboard API, combining the authenticated HTTP
//! session with the base URL every path is resolved against.

use super::http::MerakiHttpClient;
use crate::error::{ProvisionError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Default dashboard API root
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v0";

/// Main Meraki client, passed explicitly into every operation
#[derive(Clone)]
pub struct MerakiClient {
    pub http: MerakiHttpClient,
    base_url: String,
}

impl MerakiClient {
    /// Create a new client for `base_url` authenticated with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ProvisionError::MissingApiKey);
        }

        let parsed = Url::parse(base_url).map_err(|e| ProvisionError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProvisionError::InvalidUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            http: MerakiHttpClient::new(api_key)?,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Build a full API URL from a path relative to the base URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request to an API path
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.http.get(&self.api_url(path)).await
    }

    /// Make a GET request and deserialize the response
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get(path).await?;
        decode(path, value)
    }

    /// Make a POST request to an API path
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.http.post(&self.api_url(path), body).await
    }

    /// Make a POST request with query parameters to an API path
    pub async fn post_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        self.http.post_with_query(&self.api_url(path), query, body).await
    }

    /// Make a PUT request to an API path
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.http.put(&self.api_url(path), body).await
    }
}

/// Deserialize an API response, naming the path on failure
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ProvisionError::InvalidResponse(format!("{path}: {e}")))
}

/// Percent-encode one path segment (ids, serials)
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_paths() {
        let client = MerakiClient::new("https://api.meraki.com/api/v0/", "key").unwrap();
        assert_eq!(
            client.api_url("/organizations"),
            "https://api.meraki.com/api/v0/organizations"
        );
        assert_eq!(
            client.api_url("networks/N_1/ssids/0"),
            "https://api.meraki.com/api/v0/networks/N_1/ssids/0"
        );
    }

    #[test]
    fn test_new_rejects_missing_key() {
        assert!(matches!(
            MerakiClient::new(DEFAULT_BASE_URL, "  "),
            Err(ProvisionError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        assert!(matches!(
            MerakiClient::new("not a url", "key"),
            Err(ProvisionError::InvalidUrl(_))
        ));
        assert!(matches!(
            MerakiClient::new("ftp://api.meraki.com", "key"),
            Err(ProvisionError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_segment_encodes_reserved_characters() {
        assert_eq!(segment("Q2XX-AAAA-BBBB"), "Q2XX-AAAA-BBBB");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
