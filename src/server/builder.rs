//! ServerBuilder for fluent API to build the order tracking server

use super::handlers::AppState;
use super::router::{health_routes, order_routes};
use crate::config::TrackerConfig;
use crate::core::service::OrderService;
use crate::core::store::{OrderStore, SignatureStore};
use crate::storage::{FsSignatureStore, InMemoryOrderStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the order tracking HTTP server
///
/// Without explicit stores, orders live in memory and signatures are written
/// under `signatures.directory` of the configuration.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(TrackerConfig::from_yaml_file("config/tracker.yaml")?)
///     .with_order_store(InMemoryOrderStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    order_store: Option<Arc<dyn OrderStore>>,
    signature_store: Option<Arc<dyn SignatureStore>>,
    config: TrackerConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            order_store: None,
            signature_store: None,
            config: TrackerConfig::default_config(),
        }
    }

    /// Set the order record store
    pub fn with_order_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.order_store = Some(Arc::new(store));
        self
    }

    /// Set the signature store
    pub fn with_signature_store(mut self, store: impl SignatureStore + 'static) -> Self {
        self.signature_store = Some(Arc::new(store));
        self
    }

    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Build the order service from the configured stores
    pub fn build_service(&mut self) -> Result<OrderService> {
        self.config.validate()?;

        let store = self
            .order_store
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryOrderStore::new()));
        let signatures = self.signature_store.take().unwrap_or_else(|| {
            Arc::new(FsSignatureStore::new(self.config.signatures.directory.clone()))
        });

        Ok(OrderService::new(store, signatures, self.config.validator()))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let service = self.build_service()?;
        let state = AppState::new(service);

        let app = health_routes().merge(order_routes(
            state,
            self.config.signatures.max_upload_bytes,
        ));

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` of the configuration and handles SIGTERM and
    /// SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
