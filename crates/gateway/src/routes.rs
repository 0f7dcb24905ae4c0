//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health       - Liveness check
//! GET  /api/search   - Query string parameters
//! POST /api/search   - Same parameters as a JSON object
//! ```
//!
//! `/api/search` always answers 200 with exactly one JSON envelope.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use serde::Deserialize;
use shop_assistant_core::{Query as ShopperQuery, ResponseEnvelope, parse_flag};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Parameters of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub message: Option<String>,
    pub q: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub url: Option<String>,
    pub product_id: Option<String>,
    pub debug: Option<String>,
}

impl From<SearchParams> for ShopperQuery {
    fn from(params: SearchParams) -> Self {
        Self {
            message: params.message,
            explicit_query: params.q,
            size: params.size,
            color: params.color,
            product_id: params.product_id,
            product_url: params.url,
            debug: parse_flag(params.debug.as_deref()),
        }
    }
}

/// A JSON value that callers may send as text, number or boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Flag(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Number(n) => n.as_f64().is_some_and(|v| v.abs() > f64::EPSILON),
            Self::Text(s) => parse_flag(Some(s)),
        }
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub message: Option<String>,
    pub q: Option<String>,
    pub size: Option<Scalar>,
    pub color: Option<String>,
    pub url: Option<String>,
    pub product_id: Option<Scalar>,
    pub debug: Option<Scalar>,
}

impl From<SearchBody> for ShopperQuery {
    fn from(body: SearchBody) -> Self {
        Self {
            debug: body.debug.as_ref().is_some_and(Scalar::is_truthy),
            message: body.message,
            explicit_query: body.q,
            size: body.size.map(Scalar::into_text),
            color: body.color,
            product_id: body.product_id.map(Scalar::into_text),
            product_url: body.url,
        }
    }
}

/// Build the gateway router with its state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the API routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search).post(search_json))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// `GET /api/search`.
#[instrument(skip_all)]
async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.dispatcher().dispatch(params.into()).await))
}

/// `POST /api/search`.
#[instrument(skip_all)]
async fn search_json(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(body) = body?;
    Ok(Json(state.dispatcher().dispatch(body.into()).await))
}
