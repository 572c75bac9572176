//! Parameter catalog: the health bands every reading is classified against.

use axum::{
    extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use tracing::{info, warn};

use super::error_response;
use crate::{spec_for, CATALOG};

// ---

/// Catalog routes do not depend on the store, so this is generic over state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // ---
    Router::new()
        .route("/catalog", get(list))
        .route("/catalog/{parameter}", get(lookup))
}

/// Handle `GET /catalog`: all parameters in canonical column order.
async fn list() -> impl IntoResponse {
    // ---
    info!("GET /catalog");
    Json(&CATALOG[..])
}

/// Handle `GET /catalog/{parameter}`.
///
/// `parameter` is a column name such as `soil_ph`; anything else is a `404`.
async fn lookup(Path(parameter): Path<String>) -> impl IntoResponse {
    // ---
    info!("GET /catalog/{}", parameter);
    match spec_for(&parameter) {
        Ok(spec) => (StatusCode::OK, Json(spec)).into_response(),
        Err(e) => {
            warn!("{}", e);
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
    }
}
