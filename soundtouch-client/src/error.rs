//! Error types for the XML transport

use thiserror::Error;

/// Errors that can occur while talking to a device over HTTP
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or HTTP communication error (connect, timeout, body read)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a non-success HTTP status
    #[error("Device returned HTTP status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => TransportError::Status(status.as_u16()),
            None => TransportError::Network(error.to_string()),
        }
    }
}
