//! HTTP utilities for Meraki dashboard REST calls

use crate::error::{ProvisionError, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Header carrying the dashboard API key on every request (names are
/// case-insensitive on the wire, lowercase here)
pub const API_KEY_HEADER: &str = "x-cisco-meraki-api-key";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Upper bound on a single request, so one hung call cannot stall a run
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const USER_AGENT: &str = concat!("mprov/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull a readable message out of a dashboard error body.
/// The dashboard answers failures with `{"errors": ["..."]}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("errors").and_then(|e| e.as_array()).map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| sanitize_for_log(body))
}

/// HTTP client wrapper holding the authenticated dashboard session
#[derive(Clone)]
pub struct MerakiHttpClient {
    client: Client,
}

impl MerakiHttpClient {
    /// Create a client that sends `api_key` on every request
    pub fn new(api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|_| ProvisionError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);
        execute("GET", url, self.client.get(url)).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        self.post_with_query(url, &[], body).await
    }

    /// Make a POST request with query parameters
    pub async fn post_with_query(
        &self,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let mut request = self.client.post(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        execute("POST", url, request).await
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!("PUT {}", url);
        execute("PUT", url, self.client.put(url).json(body)).await
    }
}

async fn execute(method: &'static str, url: &str, request: RequestBuilder) -> Result<Value> {
    let response = request.send().await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        return Err(ProvisionError::Api {
            status: status.as_u16(),
            method,
            url: url.to_string(),
            message: error_message(&body),
        });
    }

    // Claim and some update calls answer with no body
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|e| ProvisionError::InvalidResponse(format!("{method} {url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\nbody\t!"), "badbody!");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(199), "b".repeat(50));
        // Must not panic on the multi-byte boundary
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
    }

    #[test]
    fn test_error_message_joins_dashboard_errors() {
        let body = r#"{"errors": ["Name has already been taken", "Bad type"]}"#;
        assert_eq!(error_message(body), "Name has already been taken; Bad type");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn test_invalid_api_key_header_is_rejected() {
        assert!(MerakiHttpClient::new("bad\nkey").is_err());
    }
}
