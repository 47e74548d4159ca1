//! HTTP+JSON façade for a Bose SoundTouch speaker.
//!
//! The server holds one configured device and translates small JSON requests
//! into the device's XML web API through [`soundtouch_api::SoundTouchClient`].
//! It also proxies album art so a browser client can stay on one origin, and
//! serves that client's three static files.
//!
//! # Routes
//!
//! | Method | Path                 | Body / query           |
//! |--------|----------------------|------------------------|
//! | POST   | `/device/configure`  | `{"hostname": "..."}`  |
//! | GET    | `/device/status`     |                        |
//! | GET    | `/device/volume`     |                        |
//! | POST   | `/device/volume`     | `{"value": 0..=100}`   |
//! | POST   | `/device/preset`     | `{"value": 1..=6}`     |
//! | POST   | `/device/power`      |                        |
//! | POST   | `/device/play`       |                        |
//! | POST   | `/device/pause`      |                        |
//! | POST   | `/device/next`       |                        |
//! | POST   | `/device/previous`   |                        |
//! | GET    | `/proxy/image`       | `?url=<absolute URL>`  |
//! | GET    | `/`, `/script.js`, `/styles.css` |            |
//!
//! Failures are returned as `{"detail": "..."}`: 400 when no device is
//! configured, 422 for malformed or out-of-range input, 502 when the device
//! cannot be reached or answers badly.
//!
//! # Example
//!
//! ```no_run
//! use soundtouch_server::{init_logging, ApiServer, LoggingMode, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_logging(LoggingMode::Development)?;
//!
//!     let server = ApiServer::start(&ServerConfig::default()).await?;
//!     tokio::signal::ctrl_c().await?;
//!     server.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod proxy;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{Problem, ServerError};
pub use logging::{init_logging, LoggingError, LoggingMode};
pub use router::routes;
pub use server::ApiServer;
pub use state::{AppState, DeviceRegistry};
