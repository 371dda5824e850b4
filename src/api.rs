//! Client resolution and config control endpoints.
//!
//! `GET /clients/{kind}` resolves a client descriptor against the active
//! snapshot; `POST /clients/{kind}/functions/{name}` runs a declared
//! tool's local handler; `POST /config/fetch` and `POST /config/activate`
//! drive the two-phase store by hand.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::GenerativeModel;
use crate::error::ResolverError;
use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct ActivationResponse {
    pub activated: bool,
    pub activation: u64,
    pub model_name: String,
}

pub struct ApiError(ResolverError);

impl From<ResolverError> for ApiError {
    fn from(e: ResolverError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ResolverError::UnsupportedClientKind { .. } | ResolverError::UnknownFunction { .. } => {
                StatusCode::NOT_FOUND
            }
            ResolverError::InvalidFunctionArgs { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ResolverError::ConfigFetch { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(status = %status, error = %self.0, "request failed");
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

fn resolve(state: &AppState, kind: &str) -> Result<GenerativeModel, ResolverError> {
    let snapshot = state.store.current();
    let model = state.factory.create_named(kind, &snapshot)?;
    state.stats.clients_created.fetch_add(1, Ordering::Relaxed);
    Ok(model)
}

pub async fn client_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<GenerativeModel>, ApiError> {
    Ok(Json(resolve(&state, &kind)?))
}

pub async fn function_handler(
    State(state): State<Arc<AppState>>,
    Path((kind, name)): Path<(String, String)>,
    Json(args): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let model = resolve(&state, &kind)?;
    let result = model.call_function(&name, &args)?;
    state.stats.function_calls.fetch_add(1, Ordering::Relaxed);
    Ok(Json(result))
}

fn activation_response(state: &AppState, activated: bool) -> Json<ActivationResponse> {
    let snapshot = state.store.current();
    Json(ActivationResponse {
        activated,
        activation: snapshot.activation(),
        model_name: snapshot.model_name().to_string(),
    })
}

pub async fn fetch_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActivationResponse>, ApiError> {
    let activated = state.store.fetch_and_activate().await?;
    Ok(activation_response(&state, activated))
}

pub async fn activate_handler(State(state): State<Arc<AppState>>) -> Json<ActivationResponse> {
    let activated = state.store.activate();
    activation_response(&state, activated)
}
