//! High-level API for Bose SoundTouch device control
//!
//! This crate provides a typed client for the SoundTouch web API. It uses the
//! private `soundtouch-client` crate for the HTTP exchange and adds what the
//! device protocol needs on top:
//!
//! - key events, always sent as a press followed by a release ([`Key`])
//! - typed decoding of the `volume` and `now_playing` documents
//! - local validation of volume and preset values before any network I/O
//! - one error type, [`ApiError`], for every failure
//!
//! # Example
//!
//! ```rust,no_run
//! use soundtouch_api::{DeviceTarget, SoundTouchClient};
//!
//! # async fn run() -> soundtouch_api::Result<()> {
//! let client = SoundTouchClient::open(&DeviceTarget::new("192.168.1.20")?)?;
//! client.power().await?;
//! let volume = client.get_volume().await?;
//! println!("volume {} (ramping to {})", volume.actual, volume.target);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod key;
pub mod model;
pub mod target;
pub mod validation;

pub use client::SoundTouchClient;
pub use soundtouch_client::DEVICE_PORT;
pub use error::{ApiError, Result};
pub use key::{Key, KeyState};
pub use model::{NowPlaying, NowPlayingContentItem, Volume};
pub use target::DeviceTarget;
pub use validation::{Validate, ValidationError};
