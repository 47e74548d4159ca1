//! Server configuration
//!
//! Every setting is a command-line flag with an environment variable
//! fallback, so the binary runs unchanged under systemd, Docker or a shell.

use clap::Parser;
use soundtouch_api::{DeviceTarget, DEVICE_PORT};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LoggingMode;

/// HTTP+JSON bridge for a Bose SoundTouch speaker
#[derive(Parser, Debug, Clone)]
#[command(name = "soundtouch-server")]
#[command(about = "HTTP+JSON bridge and album-art proxy for a Bose SoundTouch speaker")]
pub struct ServerConfig {
    /// Address the HTTP API binds to
    #[arg(long, env = "SOUNDTOUCH_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory holding index.html, script.js and styles.css
    #[arg(long, env = "SOUNDTOUCH_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Device hostname to configure at startup
    #[arg(long, env = "SOUNDTOUCH_DEVICE")]
    pub device: Option<String>,

    /// Device web API port
    #[arg(long, env = "SOUNDTOUCH_DEVICE_PORT", default_value_t = DEVICE_PORT)]
    pub device_port: u16,

    /// Per-request deadline for device and image requests, in seconds
    #[arg(long = "device-timeout", env = "SOUNDTOUCH_DEVICE_TIMEOUT", default_value_t = 10)]
    pub device_timeout_secs: u64,

    /// Log output mode
    #[arg(long, env = "SOUNDTOUCH_LOG_MODE", value_enum, default_value = "development")]
    pub log_mode: LoggingMode,
}

impl ServerConfig {
    /// Per-request deadline as a Duration
    pub fn device_timeout(&self) -> Duration {
        Duration::from_secs(self.device_timeout_secs)
    }

    /// The startup device, if one was given and is not blank
    pub fn initial_device(&self) -> Option<DeviceTarget> {
        self.device
            .as_deref()
            .and_then(|hostname| DeviceTarget::new(hostname).ok())
            .map(|target| target.with_port(self.device_port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            static_dir: PathBuf::from("static"),
            device: None,
            device_port: DEVICE_PORT,
            device_timeout_secs: 10,
            log_mode: LoggingMode::Development,
        }
    }
}
