//! HTTP server lifecycle

use std::net::SocketAddr;
use tokio::sync::mpsc;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::router::routes;
use crate::state::AppState;

/// The running façade
///
/// The listener is bound before `start` returns, so `local_addr` is valid
/// immediately and a port conflict is reported to the caller.
///
/// # Example
///
/// ```no_run
/// use soundtouch_server::{ApiServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let server = ApiServer::start(&ServerConfig::default())
///         .await
///         .expect("Failed to start server");
///
///     println!("Listening at: {}", server.base_url());
///
///     tokio::signal::ctrl_c().await.ok();
///     server.shutdown().await.ok();
/// }
/// ```
pub struct ApiServer {
    local_addr: SocketAddr,
    state: AppState,
    shutdown_tx: Option<mpsc::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
}

impl ApiServer {
    /// Build state from `config` and start serving on `config.bind`
    pub async fn start(config: &ServerConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(config).await?;
        Self::with_state(config.bind, state)
    }

    /// Start serving prepared state on `bind`
    ///
    /// Port 0 picks a free port; read it back with [`ApiServer::local_addr`].
    pub fn with_state(bind: SocketAddr, state: AppState) -> Result<Self, ServerError> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let (local_addr, server) = warp::serve(routes(state.clone()))
            .try_bind_with_graceful_shutdown(bind, async move {
                shutdown_rx.recv().await;
            })
            .map_err(|e| ServerError::Bind {
                addr: bind,
                reason: e.to_string(),
            })?;

        tracing::info!(
            "SoundTouch server listening on {} (static files from {})",
            local_addr,
            state.assets.root().display()
        );
        let server_handle = tokio::spawn(server);

        Ok(Self {
            local_addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            server_handle: Some(server_handle),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `http://<addr>` for clients of this server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Shared state, e.g. to inspect the configured device
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }

        if let Some(handle) = self.server_handle.take() {
            handle
                .await
                .map_err(|e| ServerError::Task(e.to_string()))?;
        }

        tracing::info!("SoundTouch server on {} stopped", self.local_addr);
        Ok(())
    }
}
