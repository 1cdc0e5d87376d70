//! HTTP transport to the recommendation service
//!
//! The [`Transport`] trait is the seam between request orchestration and the
//! wire. [`HttpTransport`] is the reqwest-backed implementation used at runtime.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// A response that arrived, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No complete response was obtained
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("request to {url} failed: {reason}")]
pub struct TransportError {
    pub url: String,
    pub reason: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Base endpoint every path is resolved against
    fn base_url(&self) -> &str;

    async fn get(&self, path: &str) -> Result<RawResponse, TransportError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError>;
}

/// Transport over a single shared reqwest client
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn finish(
        &self,
        url: String,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<RawResponse, TransportError> {
        let response = sent.map_err(|e| {
            tracing::warn!("Network error for {}: {}", url, e);
            TransportError {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read response body from {}: {}", url, e);
            TransportError {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(status, %url, "API response received");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(path);
        tracing::debug!(method = "GET", %url, "Making API request");
        let sent = self.client.get(&url).send().await;
        self.finish(url, sent).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(path);
        tracing::debug!(method = "POST", %url, data = %body, "Making API request");
        let sent = self.client.post(&url).json(body).send().await;
        self.finish(url, sent).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::time::Duration;

    /// A local port that nothing is listening on
    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let config = Config {
            api_url: closed_port_url(),
            timeout: Duration::from_secs(2),
            ..Config::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let err = transport.get("/health").await.unwrap_err();
        assert_eq!(err.url, format!("{}/health", config.api_url));
    }

    #[test]
    fn test_success_range() {
        let ok = RawResponse { status: 204, body: String::new() };
        let bad = RawResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }
}
