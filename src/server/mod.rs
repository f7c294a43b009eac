pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::notes::NotesService;
use crate::settings::{self, AppSettings};

/// Handle to the running API server.
/// Dropping this will trigger shutdown.
pub struct ApiServer {
    shutdown_tx: watch::Sender<bool>,
    runtime: Option<tokio::runtime::Runtime>,
    port: u16,
}

impl ApiServer {
    /// Start the API server on a background tokio runtime.
    ///
    /// Binds the configured port, falling back to an OS-assigned one.
    /// Writes `server.json` with port + pid on success.
    pub fn start(service: Arc<NotesService>, app_settings: &AppSettings) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("zapisnik-api")
            .build()?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let preferred = app_settings.port;
        let listener = runtime.block_on(async move {
            let addr = SocketAddr::from(([127, 0, 0, 1], preferred));
            match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => Ok(listener),
                Err(e) => {
                    log::warn!(
                        "port {} unavailable ({}), falling back to an OS-assigned port",
                        preferred,
                        e
                    );
                    tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
                }
            }
        })?;

        let port = listener.local_addr()?.port();
        log::info!("note API listening on 127.0.0.1:{}", port);

        if let Err(e) = write_server_json(port) {
            log::warn!("Failed to write server.json: {}", e);
        }

        let start_time = Instant::now();
        let log_requests = app_settings.log_requests;

        // Spawn the server task
        let shutdown_rx_clone = shutdown_rx.clone();
        runtime.spawn(async move {
            let app = routes::build_router(service, start_time, log_requests);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal(shutdown_rx_clone))
                .await
                .ok();

            log::info!("note API server shut down");
        });

        Ok(Self {
            shutdown_tx,
            runtime: Some(runtime),
            port,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Block the calling thread until ctrl-c.
    pub fn wait_for_interrupt(&self) {
        if let Some(runtime) = &self.runtime {
            let _ = runtime.block_on(tokio::signal::ctrl_c());
        }
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        // Signal shutdown
        let _ = self.shutdown_tx.send(true);

        // Shut down the tokio runtime
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(std::time::Duration::from_secs(5));
        }

        remove_server_json();

        log::info!("note API server stopped");
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        if self.runtime.is_some() {
            self.stop();
        }
    }
}

/// Wait until the shutdown signal is received.
async fn shutdown_signal(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            break;
        }
    }
}

/// Path to server.json in the config dir.
fn server_json_path() -> std::path::PathBuf {
    settings::config_dir().join("server.json")
}

/// Write server.json atomically (temp file + rename).
fn write_server_json(port: u16) -> anyhow::Result<()> {
    let path = server_json_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::json!({
        "port": port,
        "pid": std::process::id(),
    });

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, serde_json::to_string_pretty(&content)?)?;
    std::fs::rename(&tmp_path, &path)?;

    Ok(())
}

/// Remove server.json on shutdown.
fn remove_server_json() {
    let path = server_json_path();
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }
}
