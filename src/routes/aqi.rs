//! Standalone PM2.5 to AQI conversion.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::{error_response, AppState};
use crate::aqi::pm25_to_aqi;
use crate::models::AqiConversion;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/api/aqi", get(handler))
}

#[derive(Debug, Deserialize)]
struct AqiQuery {
    pm25: Option<String>,
}

async fn handler(Query(params): Query<AqiQuery>) -> Response {
    // ---
    debug!("GET /api/aqi {:?}", params);

    let Some(raw) = params.pm25.as_deref() else {
        return error_response(StatusCode::BAD_REQUEST, "pm25 is required", None);
    };
    let Ok(pm25) = raw.trim().parse::<f64>() else {
        return error_response(StatusCode::BAD_REQUEST, "pm25 must be a number", None);
    };

    match pm25_to_aqi(pm25) {
        Ok(aqi) => (StatusCode::OK, Json(AqiConversion::new(pm25, aqi))).into_response(),
        Err(e) => error_response(
            StatusCode::BAD_REQUEST,
            "Invalid PM2.5 concentration",
            Some(e.to_string()),
        ),
    }
}
