//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create one Axum Router per transport (plain HTTP, HTTPS)
//! - Put the redirect layer in front of the next handler
//! - Mark HTTPS requests with the TLS connection extension
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind listeners and serve until shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Extension, Router};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigError, RedirectorConfig};
use crate::lifecycle::shutdown::{self, Shutdown};
use crate::net::tls::load_tls_config;
use crate::redirect::{RedirectLayer, Rule, TlsConnection};

/// How long in-flight HTTPS requests get to finish after shutdown.
const TLS_DRAIN_SECS: u64 = 10;

/// Error type for server operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("TLS setup failed: {0}")]
    Tls(std::io::Error),

    #[error("Server error: {0}")]
    Serve(std::io::Error),

    #[error("Listener task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// HTTP server hosting the redirect middleware.
#[derive(Debug, Clone)]
pub struct HttpServer {
    config: RedirectorConfig,
    rules: Arc<[Rule]>,
}

impl HttpServer {
    /// Create a new HTTP server, compiling the configured rules.
    pub fn new(config: RedirectorConfig) -> Result<Self, ConfigError> {
        let rules = config.compile_rules().map_err(ConfigError::Validation)?;

        tracing::info!(rules = rules.len(), "Redirect rules compiled");
        Ok(Self {
            config,
            rules: rules.into(),
        })
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectorConfig {
        &self.config
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `tls` marks every request as received over a TLS connection.
    #[allow(deprecated)]
    pub fn router(&self, tls: bool) -> Router {
        let router = match &self.config.site.root {
            Some(root) => Router::new().fallback_service(ServeDir::new(root)),
            None => Router::new().fallback(not_found),
        };

        let router = router.layer(RedirectLayer::new(Arc::clone(&self.rules)));
        let router = if tls {
            router.layer(Extension(TlsConnection))
        } else {
            router
        };

        router
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn serve(&self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router(false))
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn serve_tls(
        &self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            shutdown::wait(shutdown).await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router(true).into_make_service())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!(address = %addr, "HTTPS server stopped");
        Ok(())
    }

    /// Bind the configured listeners and serve until `shutdown` is triggered.
    pub async fn run(&self, shutdown: &Shutdown) -> Result<(), ServerError> {
        let bind_address = &self.config.listener.bind_address;
        let listener = TcpListener::bind(bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                address: bind_address.clone(),
                source,
            })?;

        let mut tasks = JoinSet::new();

        let server = self.clone();
        let rx = shutdown.subscribe();
        tasks.spawn(async move { server.serve(listener, rx).await });

        if let Some(tls) = &self.config.listener.tls {
            let addr: SocketAddr = tls.bind_address.parse().map_err(|e| ServerError::Bind {
                address: tls.bind_address.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
            })?;
            let rustls = load_tls_config(&tls.cert_path, &tls.key_path)
                .await
                .map_err(ServerError::Tls)?;

            let server = self.clone();
            let rx = shutdown.subscribe();
            tasks.spawn(async move { server.serve_tls(addr, rustls, rx).await });
        }

        while let Some(result) = tasks.join_next().await {
            result??;
        }
        Ok(())
    }
}

/// Next handler when no site root is configured.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
