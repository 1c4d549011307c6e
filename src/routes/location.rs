//! Ad-hoc air quality report for arbitrary coordinates.
//!
//! Nothing here is stored; every call goes to the provider.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info};

use super::{error_response, AppState};
use crate::aqi::{pm25_to_aqi, AqiLevel};
use crate::models::{LocationAirQuality, LocationReport};
use crate::pollutants::main_pollutant;
use crate::provider::ProviderError;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/api/location", get(handler))
}

/// Coordinates are taken as strings so bad input gets a JSON 400.
#[derive(Debug, Deserialize)]
struct LocationQuery {
    lat: Option<String>,
    lon: Option<String>,
}

async fn handler(Query(params): Query<LocationQuery>, State(state): State<AppState>) -> Response {
    // ---
    info!("GET /api/location {:?}", params);

    let (lat, lon) = match parse_coordinates(&params) {
        Ok(coords) => coords,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message, None),
    };

    match build_report(&state, lat, lon).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Failed to fetch location data for ({}, {}): {}", lat, lon, e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch location data",
                Some(e.to_string()),
            )
        }
    }
}

fn parse_coordinates(params: &LocationQuery) -> Result<(f64, f64), &'static str> {
    // ---
    let (Some(lat), Some(lon)) = (params.lat.as_deref(), params.lon.as_deref()) else {
        return Err("Latitude and longitude are required");
    };

    let lat: f64 = lat.trim().parse().map_err(|_| "Latitude must be a number")?;
    let lon: f64 = lon.trim().parse().map_err(|_| "Longitude must be a number")?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok((lat, lon))
}

async fn build_report(state: &AppState, lat: f64, lon: f64) -> Result<LocationReport, ProviderError> {
    // ---
    let provider = &state.provider;
    let (sample, conditions) = tokio::try_join!(
        provider.air_pollution(lat, lon),
        provider.current_weather(lat, lon),
    )?;

    let aqi = pm25_to_aqi(sample.reading.pm2_5)?;
    let main = main_pollutant(&sample.reading)?;

    Ok(LocationReport {
        id: "current-location",
        name: conditions
            .place_name
            .unwrap_or_else(|| "Current Location".to_string()),
        province: format!("{:.4}, {:.4}", lat, lon),
        latitude: lat,
        longitude: lon,
        air_quality: LocationAirQuality {
            aqi,
            level: AqiLevel::from_aqi(aqi).into(),
            main_pollutant: main,
            pollutants: sample.reading,
            timestamp: sample.measured_at,
        },
        weather: conditions.weather,
    })
}
