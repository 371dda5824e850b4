//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, active snapshot metadata, and cumulative counters.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::SystemTime;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Short git commit the binary was built from.
    pub commit: String,
    pub uptime_seconds: u64,
    pub config: ConfigHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub activation: u64,
    pub activated_ago_seconds: u64,
    pub pending: bool,
    pub namespace: String,
    pub model_name: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub clients_created: u64,
    pub function_calls: u64,
    pub fetches: u64,
    pub activations: u64,
    pub update_errors: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.store.current();
    let activated_ago = SystemTime::now()
        .duration_since(snapshot.activated_at())
        .map_or(0, |d| d.as_secs());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("GENAI_RESOLVER_GIT_SHORT").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config: ConfigHealth {
            source: snapshot.source().to_string(),
            version: snapshot.version().short().to_string(),
            activation: snapshot.activation(),
            activated_ago_seconds: activated_ago,
            pending: state.store.has_pending(),
            namespace: state.namespace.clone(),
            model_name: snapshot.model_name().to_string(),
        },
        stats: StatsResponse {
            clients_created: state.stats.clients_created.load(Ordering::Relaxed),
            function_calls: state.stats.function_calls.load(Ordering::Relaxed),
            fetches: state.store.fetch_count(),
            activations: state.store.activation_count(),
            update_errors: state.store.update_error_count(),
        },
    })
}
