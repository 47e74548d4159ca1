//! Error types for the HTTP façade
//!
//! Startup failures are [`ServerError`]s. Request failures travel through
//! warp as a [`Problem`] rejection and are rendered by [`handle_rejection`]
//! as `{"detail": "..."}` with the matching status code.

use serde::Serialize;
use soundtouch_api::ApiError;
use std::convert::Infallible;
use std::net::SocketAddr;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Errors that prevent the server from starting or stopping cleanly
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Server task failed: {0}")]
    Task(String),
}

/// A request failure with the status and message the caller should see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub status: StatusCode,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    pub fn into_rejection(self) -> Rejection {
        warp::reject::custom(self)
    }
}

impl warp::reject::Reject for Problem {}

impl From<ApiError> for Problem {
    fn from(error: ApiError) -> Self {
        let status = match &error {
            ApiError::NotConfigured | ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NetworkError(_) | ApiError::DeviceStatus(_) | ApiError::ParseError(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self::new(status, error.to_string())
    }
}

/// Log a client failure and turn it into a rejection
pub fn api_failure(error: ApiError) -> Rejection {
    if error.is_protocol_error() {
        tracing::warn!("Device request failed: {}", error);
    } else {
        tracing::debug!("Rejected device request: {}", error);
    }
    Problem::from(error).into_rejection()
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Handle rejections and convert them to JSON error responses
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = if let Some(problem) = err.find::<Problem>() {
        (problem.status, problem.detail.clone())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected application/json".to_string())
    } else if let Some(e) = err.find::<warp::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { detail }),
        status,
    ))
}
