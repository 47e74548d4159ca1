use soundtouch_client::TransportError;
use thiserror::Error;

use crate::validation::ValidationError;

/// High-level API errors for SoundTouch operations
///
/// Three families of failure exist: the caller never told us which device to
/// talk to, the caller passed a value outside its domain (rejected before any
/// network I/O), or the exchange with the device failed. The last family is
/// split into network, status and parse errors; see [`ApiError::is_protocol_error`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// No device target has been configured
    #[error("Device not configured")]
    NotConfigured,

    /// Invalid parameter value
    ///
    /// Returned for volume or preset values outside their range. Raised
    /// before any request is sent to the device.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Network communication error
    ///
    /// Connection refused, timeouts, DNS failures, or the device dropping the
    /// connection mid-response.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Device answered with a non-success HTTP status
    #[error("Device error: HTTP status {0}")]
    DeviceStatus(u16),

    /// Response parsing error
    ///
    /// The device returned a body that is not XML or not the document we
    /// asked for.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ApiError {
    /// True for failures of the wire exchange itself (network, status, parse)
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            ApiError::NetworkError(_) | ApiError::DeviceStatus(_) | ApiError::ParseError(_)
        )
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Network(msg) => ApiError::NetworkError(msg),
            TransportError::Status(code) => ApiError::DeviceStatus(code),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidParameter(error.to_string())
    }
}

impl From<quick_xml::DeError> for ApiError {
    fn from(error: quick_xml::DeError) -> Self {
        ApiError::ParseError(error.to_string())
    }
}
