//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the config store,
//! client factory, stats, and uptime), [`build_router`] for constructing
//! the Axum router with middleware layers, and [`shutdown_signal`] for
//! SIGTERM / Ctrl+C handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::client::ClientFactory;
use crate::config::store::ConfigStore;
use crate::health::health_handler;

#[derive(Debug)]
pub struct Stats {
    pub clients_created: AtomicU64,
    pub function_calls: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clients_created: AtomicU64::new(0),
            function_calls: AtomicU64::new(0),
        }
    }
}

pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub factory: ClientFactory,
    pub start_time: Instant,
    pub namespace: String,
    pub stats: Stats,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<ConfigStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            factory: ClientFactory::new(),
            start_time: Instant::now(),
            namespace: namespace.into(),
            stats: Stats::new(),
        }
    }
}

pub fn build_router(state: Arc<AppState>, max_body: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/clients/{kind}", get(api::client_handler))
        .route(
            "/clients/{kind}/functions/{name}",
            post(api::function_handler),
        )
        .route("/config/fetch", post(api::fetch_handler))
        .route("/config/activate", post(api::activate_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
