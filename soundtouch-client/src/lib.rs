//! Private XML-over-HTTP client for SoundTouch device communication
//!
//! This crate provides a minimal client for the SoundTouch web API that every
//! speaker exposes on port 8090. Requests are plain HTTP: a GET returns an XML
//! document, a POST carries a small XML body. Interpreting those documents is
//! left to the `soundtouch-api` crate, which is written against the
//! [`XmlTransport`] trait rather than this concrete client.

mod error;

pub use error::TransportError;

use async_trait::async_trait;
use std::time::Duration;

/// Port the SoundTouch web API listens on
pub const DEVICE_PORT: u16 = 8090;

/// Per-request deadline used when no other timeout is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// A single-request XML exchange with one device.
///
/// Endpoints are given relative to the device base URL, e.g. `"volume"` or
/// `"now_playing"`.
#[async_trait]
pub trait XmlTransport: Send + Sync {
    /// GET an endpoint and return the response body as text
    async fn get_xml(&self, endpoint: &str) -> Result<String>;

    /// POST an XML body to an endpoint, discarding the response body
    async fn post_xml(&self, endpoint: &str, body: String) -> Result<()>;
}

/// HTTP transport bound to one device base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `http://{hostname}:{port}` with the given deadline
    pub fn new(hostname: &str, port: u16, timeout: Duration) -> Result<Self> {
        Self::with_base_url(format!("http://{}:{}", hostname, port), timeout)
    }

    /// Create a transport for an explicit base URL (no trailing slash needed)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// The base URL all endpoints are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl XmlTransport for HttpTransport {
    async fn get_xml(&self, endpoint: &str) -> Result<String> {
        let url = self.url(endpoint);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("GET response status: {}, body: {}", status.as_u16(), body);
        Ok(body)
    }

    async fn post_xml(&self, endpoint: &str, body: String) -> Result<()> {
        let url = self.url(endpoint);
        tracing::debug!("POST {} with body: {}", url, body);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "text/xml; charset=\"utf-8\"")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("POST response status: {}", response.status().as_u16());
        Ok(())
    }
}
