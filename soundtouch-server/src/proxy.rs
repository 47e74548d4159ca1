//! Album-art proxy
//!
//! The device reports artwork as absolute URLs on third-party hosts, often
//! plain HTTP. Fetching them through the server keeps the browser on one
//! origin.

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::error::ServerError;

/// Content type assumed when the upstream host sends none
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Why an image could not be proxied
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Image request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Image bytes plus the upstream content type
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Fetches remote images with one shared HTTP client
#[derive(Debug, Clone)]
pub struct ImageProxy {
    http: reqwest::Client,
}

impl ImageProxy {
    pub fn new(timeout: Duration) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::HttpClient(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch `url`, requiring an absolute http(s) URL and a 2xx answer
    pub async fn fetch(&self, url: &str) -> Result<ProxiedImage, ProxyError> {
        let url = Url::parse(url).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let response = self.http.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();
        let bytes = response.bytes().await?;

        Ok(ProxiedImage {
            content_type,
            bytes,
        })
    }
}
