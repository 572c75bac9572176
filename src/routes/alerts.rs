//! Latest-readings view: the newest readings, each with its alert report.

use axum::{
    extract::rejection::QueryRejection, extract::Query, extract::State, http::StatusCode,
    response::IntoResponse, routing::get, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{bad_query, read_store, AppState};
use crate::{build_report, AlertReport, SensorReading};

// ---

/// Subrouter with `GET /alerts/latest`.
pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/alerts/latest", get(handler))
}

/// Query parameters for the latest-alerts view
#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    /// Number of readings; defaults to `SAPM_LATEST_COUNT`, capped at `SAPM_MAX_LIMIT`.
    limit: Option<usize>,
}

/// A reading paired with its verdicts
#[derive(Debug, Serialize)]
pub struct ReadingAlerts {
    reading: SensorReading,
    report: AlertReport,
}

/// Handle `GET /alerts/latest?limit=N`.
///
/// Re-reads the store, keeps the `N` newest readings (newest first) and
/// classifies each one. A load failure is a `500` with a JSON error body;
/// no partial list is returned.
async fn handler(
    query: Result<Query<LatestQuery>, QueryRejection>,
    State((store, config)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_query(rejection),
    };

    let limit = config.effective_limit(params.limit, config.latest_count);
    info!("GET /alerts/latest - limit {}", limit);

    let readings = match read_store(store, move |s| s.most_recent(limit)).await {
        Ok(readings) => readings,
        Err(response) => return response,
    };

    let entries: Vec<ReadingAlerts> = readings
        .into_iter()
        .map(|reading| {
            let report = build_report(&reading);
            ReadingAlerts { reading, report }
        })
        .collect();

    let flagged = entries.iter().filter(|e| !e.report.is_nominal()).count();
    debug!(
        "GET /alerts/latest - {} readings, {} with alerts",
        entries.len(),
        flagged
    );

    (StatusCode::OK, Json(entries)).into_response()
}
