use serde::{Deserialize, Serialize};
use soundtouch_client::DEVICE_PORT;

use crate::error::{ApiError, Result};

/// The one device this process controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTarget {
    /// Hostname or IP address of the device
    pub hostname: String,
    /// Web API port; always 8090 on real hardware
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEVICE_PORT
}

impl DeviceTarget {
    /// Target a device on the standard SoundTouch port
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotConfigured` if the hostname is blank.
    pub fn new(hostname: &str) -> Result<Self> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(ApiError::NotConfigured);
        }

        Ok(Self {
            hostname: hostname.to_string(),
            port: DEVICE_PORT,
        })
    }

    /// Same target on another port (simulators and tests)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `http://{hostname}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let target = DeviceTarget::new("192.168.1.20").unwrap();
        assert_eq!(target.port, 8090);
        assert_eq!(target.base_url(), "http://192.168.1.20:8090");
    }

    #[test]
    fn test_hostname_is_trimmed() {
        let target = DeviceTarget::new("  speaker.local \n").unwrap();
        assert_eq!(target.hostname, "speaker.local");
    }

    #[test]
    fn test_blank_hostname_rejected() {
        assert!(matches!(DeviceTarget::new("   "), Err(ApiError::NotConfigured)));
    }

    #[test]
    fn test_with_port() {
        let target = DeviceTarget::new("127.0.0.1").unwrap().with_port(18090);
        assert_eq!(target.base_url(), "http://127.0.0.1:18090");
    }
}
