use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use harbourguide_catalog::{nearby, NearbyFilter};
use harbourguide_common::{GeoPoint, Pool};

use crate::chat::{answer, ChatRequest};
use crate::AppState;

const MAX_NEARBY_RADIUS_KM: f64 = 25.0;

fn bad_request(error: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": error})),
    )
        .into_response()
}

// --- Query structs ---

#[derive(Deserialize)]
pub struct NearQuery {
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
    #[serde(alias = "viewMode")]
    pool: Option<String>,
    q: Option<String>,
    district: Option<String>,
    radius_km: Option<f64>,
    indoor_only: Option<bool>,
}

// --- Handlers ---

pub async fn health() -> &'static str {
    "Server is running. POST to /api/chat."
}

pub async fn api_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    // A body axum cannot decode carries no usable message.
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected chat request body");
            return bad_request("message required");
        }
    };

    let message = match body.message.as_deref() {
        Some(m) if !m.trim().is_empty() => m,
        _ => return bad_request("message required"),
    };

    info!("Chat request");
    let reply = answer(
        &state,
        message,
        body.user_lat,
        body.user_lon,
        body.view_mode.as_deref(),
    )
    .await;

    Json(reply).into_response()
}

pub async fn api_places_near(
    State(state): State<Arc<AppState>>,
    params: Result<Query<NearQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Ok(Query(params)) = params else {
        return bad_request("lat and lon must be finite numbers");
    };
    let origin = GeoPoint::new(params.lat, params.lon);
    if !origin.is_valid() {
        return bad_request("lat and lon must be finite numbers");
    }

    let filter = NearbyFilter {
        radius_km: params
            .radius_km
            .filter(|r| r.is_finite())
            .unwrap_or(NearbyFilter::default().radius_km)
            .clamp(0.0, MAX_NEARBY_RADIUS_KM),
        query: params.q,
        district: params.district,
        indoor_only: params.indoor_only.unwrap_or(false),
    };
    let pool = Pool::from_view_mode(params.pool.as_deref());

    let places = nearby(state.catalog.pool(pool), origin, &filter);
    let recommendation = places.first().cloned();

    Json(serde_json::json!({
        "places": places,
        "recommendation": recommendation,
    }))
    .into_response()
}
