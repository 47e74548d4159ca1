//! Request handlers
//!
//! Each device handler opens one client session, performs one operation and
//! lets the session drop before the reply is written.

use serde::{Deserialize, Serialize};
use soundtouch_api::validation::{check_range, Validate, ValidationError};
use warp::{Rejection, Reply};

use crate::assets::Asset;
use crate::error::{api_failure, Problem};
use crate::state::AppState;

/// Body of `POST /device/configure`
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureRequest {
    pub hostname: String,
}

/// Body of `POST /device/volume`
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRequest {
    pub value: i64,
}

/// Body of `POST /device/preset`
#[derive(Debug, Clone, Deserialize)]
pub struct PresetRequest {
    pub value: i64,
}

/// Query of `GET /proxy/image`
#[derive(Debug, Clone, Deserialize)]
pub struct ImageQuery {
    pub url: String,
}

impl Validate for ConfigureRequest {
    fn validate_boundary(&self) -> Result<(), ValidationError> {
        if self.hostname.trim().is_empty() {
            return Err(ValidationError::missing("hostname"));
        }
        Ok(())
    }
}

impl Validate for VolumeRequest {
    fn validate_boundary(&self) -> Result<(), ValidationError> {
        check_range("value", self.value, 0..=100).map(|_| ())
    }
}

impl Validate for PresetRequest {
    fn validate_boundary(&self) -> Result<(), ValidationError> {
        check_range("value", self.value, 1..=6).map(|_| ())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

fn message(text: impl Into<String>) -> warp::reply::Json {
    warp::reply::json(&MessageBody {
        message: text.into(),
    })
}

fn validated<T: Validate>(request: T) -> Result<T, Rejection> {
    request
        .validate_boundary()
        .map_err(|e| Problem::unprocessable(e.to_string()).into_rejection())?;
    Ok(request)
}

pub async fn configure(request: ConfigureRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let request = validated(request)?;
    state
        .devices
        .configure(&request.hostname)
        .await
        .map_err(api_failure)?;
    Ok(message("Device configured successfully"))
}

pub async fn get_status(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    let status = client.get_status().await.map_err(api_failure)?;
    Ok(warp::reply::json(&status))
}

pub async fn get_volume(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    let volume = client.get_volume().await.map_err(api_failure)?;
    Ok(warp::reply::json(&volume))
}

pub async fn set_volume(request: VolumeRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let request = validated(request)?;
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.set_volume(request.value).await.map_err(api_failure)?;
    Ok(message(format!("Volume set to {}", request.value)))
}

pub async fn set_preset(request: PresetRequest, state: AppState) -> Result<impl Reply, Rejection> {
    let request = validated(request)?;
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.set_preset(request.value).await.map_err(api_failure)?;
    Ok(message(format!("Selected preset {}", request.value)))
}

pub async fn power(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.power().await.map_err(api_failure)?;
    Ok(message("Power toggled"))
}

pub async fn play(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.play().await.map_err(api_failure)?;
    Ok(message("Playback started"))
}

pub async fn pause(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.pause().await.map_err(api_failure)?;
    Ok(message("Playback paused"))
}

pub async fn next_track(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.next_track().await.map_err(api_failure)?;
    Ok(message("Skipped to next track"))
}

pub async fn previous_track(state: AppState) -> Result<impl Reply, Rejection> {
    let client = state.devices.open_session().await.map_err(api_failure)?;
    client.previous_track().await.map_err(api_failure)?;
    Ok(message("Skipped to previous track"))
}

pub async fn proxy_image(query: ImageQuery, state: AppState) -> Result<impl Reply, Rejection> {
    match state.images.fetch(&query.url).await {
        Ok(image) => Ok(warp::reply::with_header(
            image.bytes.to_vec(),
            "content-type",
            image.content_type,
        )),
        Err(e) => {
            tracing::error!("Error proxying image {}: {}", query.url, e);
            Err(Problem::not_found("Image not found").into_rejection())
        }
    }
}

pub async fn serve_asset(asset: Asset, state: AppState) -> Result<impl Reply, Rejection> {
    match state.assets.load(asset).await {
        Ok(bytes) => Ok(warp::reply::with_header(
            bytes,
            "content-type",
            asset.content_type(),
        )),
        Err(e) => {
            tracing::debug!("Static asset {} unavailable: {}", asset.file_name(), e);
            Err(Problem::not_found(format!("{} not found", asset.file_name())).into_rejection())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, true)]
    #[case(100, true)]
    #[case(-1, false)]
    #[case(150, false)]
    fn test_volume_request_bounds(#[case] value: i64, #[case] valid: bool) {
        assert_eq!(VolumeRequest { value }.validate_boundary().is_ok(), valid);
    }

    #[rstest]
    #[case(1, true)]
    #[case(6, true)]
    #[case(0, false)]
    #[case(7, false)]
    fn test_preset_request_bounds(#[case] value: i64, #[case] valid: bool) {
        assert_eq!(PresetRequest { value }.validate_boundary().is_ok(), valid);
    }

    #[test]
    fn test_blank_hostname_invalid() {
        let request = ConfigureRequest {
            hostname: " ".to_string(),
        };
        assert!(request.validate_boundary().is_err());
    }
}
