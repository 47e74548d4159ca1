//! Shared state handed to every request handler

use soundtouch_api::{ApiError, DeviceTarget, SoundTouchClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::assets::StaticAssets;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::proxy::ImageProxy;

/// Holder for the one configured device
///
/// Cloning shares the same slot. Configuration replaces the target
/// wholesale, so a request racing a reconfiguration sees either the old
/// or the new device.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    target: Arc<RwLock<Option<DeviceTarget>>>,
    port: u16,
    timeout: Duration,
}

impl DeviceRegistry {
    /// Empty registry; targets get `port` and sessions get `timeout`
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            target: Arc::new(RwLock::new(None)),
            port,
            timeout,
        }
    }

    /// Replace the configured device
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotConfigured` for a blank hostname.
    pub async fn configure(&self, hostname: &str) -> Result<DeviceTarget, ApiError> {
        let target = DeviceTarget::new(hostname)?.with_port(self.port);
        self.replace(target.clone()).await;
        Ok(target)
    }

    /// Install an already validated target
    pub async fn replace(&self, target: DeviceTarget) {
        tracing::info!("Device configured: {}", target.base_url());
        *self.target.write().await = Some(target);
    }

    /// The configured device, if any
    pub async fn current(&self) -> Option<DeviceTarget> {
        self.target.read().await.clone()
    }

    /// Open a client session for the configured device
    ///
    /// The session lives until the caller drops it.
    pub async fn open_session(&self) -> Result<SoundTouchClient, ApiError> {
        let target = self.current().await.ok_or(ApiError::NotConfigured)?;
        SoundTouchClient::open_with_timeout(&target, self.timeout)
    }
}

/// Everything the routes need, cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    pub devices: DeviceRegistry,
    pub images: ImageProxy,
    pub assets: StaticAssets,
}

impl AppState {
    pub fn new(devices: DeviceRegistry, images: ImageProxy, assets: StaticAssets) -> Self {
        Self {
            devices,
            images,
            assets,
        }
    }

    /// Build state from configuration, pre-configuring the startup device
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let devices = DeviceRegistry::new(config.device_port, config.device_timeout());
        match (config.initial_device(), config.device.as_deref()) {
            (Some(target), _) => devices.replace(target).await,
            (None, Some(hostname)) => {
                tracing::warn!("Ignoring blank startup device {:?}", hostname)
            }
            (None, None) => {}
        }

        let images = ImageProxy::new(config.device_timeout())?;
        let assets = StaticAssets::new(&config.static_dir);

        Ok(Self::new(devices, images, assets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_session_fails() {
        let registry = DeviceRegistry::new(8090, Duration::from_secs(1));

        assert!(registry.current().await.is_none());
        assert!(matches!(
            registry.open_session().await,
            Err(ApiError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_last_configuration_wins() {
        let registry = DeviceRegistry::new(8090, Duration::from_secs(1));
        let shared = registry.clone();

        registry.configure("10.0.0.5").await.unwrap();
        shared.configure("10.0.0.6").await.unwrap();

        let target = registry.current().await.unwrap();
        assert_eq!(target.hostname, "10.0.0.6");
        assert_eq!(target.port, 8090);
        assert!(registry.open_session().await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_hostname_keeps_previous_target() {
        let registry = DeviceRegistry::new(8090, Duration::from_secs(1));
        registry.configure("10.0.0.5").await.unwrap();

        assert!(registry.configure("").await.is_err());
        assert_eq!(registry.current().await.unwrap().hostname, "10.0.0.5");
    }

    #[tokio::test]
    async fn test_state_from_config_with_startup_device() {
        let config = ServerConfig {
            device: Some("speaker.local".to_string()),
            device_port: 18090,
            ..ServerConfig::default()
        };

        let state = AppState::from_config(&config).await.unwrap();
        let target = state.devices.current().await.unwrap();

        assert_eq!(target.base_url(), "http://speaker.local:18090");
    }
}
