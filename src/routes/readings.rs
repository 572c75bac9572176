//! Full reading listing in source order.

use axum::{
    extract::rejection::QueryRejection, extract::Query, extract::State, http::StatusCode,
    response::IntoResponse, routing::get, Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::{bad_query, read_store, AppState};
use crate::SensorReading;

// ---

/// Subrouter with `GET /readings`.
pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/readings", get(handler))
}

/// Query parameters for the full reading listing
#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    /// Exact match on the opaque device identifier.
    device_id: Option<String>,
    /// Defaults to, and is capped at, `SAPM_MAX_LIMIT`.
    limit: Option<usize>,
}

/// Handle `GET /readings?device_id=..&limit=..`.
///
/// Returns raw readings without classification. A load failure is a `500`
/// with a JSON error body.
async fn handler(
    query: Result<Query<ReadingsQuery>, QueryRejection>,
    State((store, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_query(rejection),
    };

    info!("GET /readings - {:?}", params);

    let readings = match read_store(store, |s| s.load()).await {
        Ok(readings) => readings,
        Err(response) => return response,
    };

    let limit = config.effective_limit(params.limit, config.max_limit);
    let filtered = apply_filters(readings, params.device_id.as_deref(), limit);
    info!("GET /readings - returning {} readings", filtered.len());

    (StatusCode::OK, Json(filtered)).into_response()
}

/// Keep source order, filter by device, then cap the count.
fn apply_filters(
    readings: Vec<SensorReading>,
    device_id: Option<&str>,
    limit: usize,
) -> Vec<SensorReading> {
    // ---
    readings
        .into_iter()
        .filter(|r| device_id.map_or(true, |id| r.device_id == id))
        .take(limit)
        .collect()
}
