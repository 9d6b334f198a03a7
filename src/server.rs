use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::traffic::{TimeFilter, TrafficModel, to_feature_collection};

#[derive(Clone)]
struct AppState {
    model: Arc<TrafficModel>,
}

/// The traffic API consumed by the map frontend. CORS is open so the static
/// map page can be served from anywhere.
pub fn router(model: Arc<TrafficModel>) -> Router {
    Router::new()
        .route("/api/traffic", get(traffic))
        .layer(CorsLayer::permissive())
        .with_state(AppState { model })
}

#[derive(Debug, Deserialize)]
struct TrafficQuery {
    minute: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrafficResponse {
    time_filter: i32,
    time_label: Option<String>,
    /// Radius-scale domain for the map layer: the largest snapshot total.
    max_total_traffic: usize,
    stations: geojson::FeatureCollection,
}

async fn traffic(
    State(state): State<AppState>,
    Query(query): Query<TrafficQuery>,
) -> Result<Json<TrafficResponse>, (StatusCode, String)> {
    let raw = query.minute.unwrap_or(-1);
    let filter = TimeFilter::from_slider(raw).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("minute must be in [-1, 1439], got {raw}"),
        )
    })?;

    let snapshots = state.model.snapshot(filter);
    let max_total_traffic = snapshots.iter().map(|s| s.total_traffic).max().unwrap_or(0);
    let stations = to_feature_collection(&snapshots).map_err(|e| {
        tracing::error!(error = %e, "serializing station snapshots");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "snapshot serialization failed".to_string(),
        )
    })?;

    Ok(Json(TrafficResponse {
        time_filter: raw,
        time_label: filter.label(),
        max_total_traffic,
        stations,
    }))
}
