//! Route gateway: merges every subrouter and binds the shared state.

use axum::{
    extract::rejection::QueryRejection, http::StatusCode, response::IntoResponse,
    response::Response, Json, Router,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::{Config, LoadError, ReadingStore, SensorReading};

mod alerts;
mod catalog;
mod health;
mod readings;

// ---

/// Shared state handed to every store-backed route.
pub type AppState = (ReadingStore, Config);

/// Build the complete API router.
///
/// Routes:
/// - `GET /alerts/latest` – newest readings with their alert reports
/// - `GET /readings` – all readings in source order
/// - `GET /catalog`, `GET /catalog/{parameter}` – parameter health bands
/// - `GET /health` – liveness
pub fn router(store: ReadingStore, config: Config) -> Router {
    // ---
    Router::new()
        .merge(alerts::router())
        .merge(readings::router())
        .merge(catalog::router())
        .merge(health::router())
        .with_state((store, config))
}

// ---

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    // ---
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// JSON `400` for a query string that does not deserialize (e.g. `limit=abc`).
pub(crate) fn bad_query(rejection: QueryRejection) -> Response {
    // ---
    warn!("Rejected query: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Run a store read on the blocking pool; the store does synchronous file I/O.
pub(crate) async fn read_store<F>(store: ReadingStore, op: F) -> Result<Vec<SensorReading>, Response>
where
    F: FnOnce(&ReadingStore) -> Result<Vec<SensorReading>, LoadError> + Send + 'static,
{
    // ---
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(Ok(readings)) => Ok(readings),
        Ok(Err(e)) => {
            error!("Failed to load readings: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => {
            error!("Store task failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load readings",
            ))
        }
    }
}
