//! # Archive Relay Server
//!
//! Fronts the target site's archive endpoint with a small JSON API built on `Axum`:
//! `POST /resolve`, `POST /destroy` and `/status`.
//!
//! ## Example
//! ```no_run
//! use relay_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4655)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

pub mod cli;
pub mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use relay_archiver::Archiver;
use relay_domain::config::RelayConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Fluent builder for [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: RelayConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: RelayConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Validates TLS files and builds the archiver slice.
    ///
    /// # Errors
    /// Returns an error if a configured certificate or key is missing, or if the target
    /// site client cannot be built (bad proxy URL, unusable cookie header).
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        if self.cfg.target.cookie.is_empty() {
            tracing::warn!("No target site cookie configured, archive requests will be anonymous");
        }

        let archiver = relay_archiver::init(&self.cfg).context("Failed to initialize archiver")?;

        Ok(Server { cfg: self.cfg, archiver })
    }
}

/// A built server, ready to bind.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    cfg: RelayConfig,
    archiver: Archiver,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete HTTP application, without a listener.
    pub fn router(&self) -> Router {
        router::init(self.archiver.clone(), self.cfg.server.docs)
    }

    #[must_use]
    pub const fn config(&self) -> &RelayConfig {
        &self.cfg
    }

    /// Binds the configured address and serves until SIGINT or SIGTERM.
    ///
    /// In-flight requests get a grace period before the listener is torn down.
    ///
    /// # Errors
    /// Returns an error if binding fails or the TLS material cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        let app = self.router();

        info!(
            address = %address,
            ssl = self.cfg.server.ssl.is_some(),
            docs = self.cfg.server.docs,
            "Starting server"
        );

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl) = &self.cfg.server.ssl {
            info!("Listening on https://{address}");

            let tls_config =
                axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Listening on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
