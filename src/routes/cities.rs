//! City listing, detail and refresh routes.
//!
//! A refresh pulls air pollution, current weather and the forecast for one
//! city from the provider, runs the AQI core over the reading and replaces
//! everything cached for that city.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{error_response, AppState};
use crate::aqi::pm25_to_aqi;
use crate::forecast;
use crate::models::{AirQualityUpdate, City, CityDetail, CityWithData, HourlyForecast};
use crate::pollutants::main_pollutant;
use crate::provider::ProviderError;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/cities", get(list_cities))
        .route("/api/cities/{id}", get(city_detail))
        .route("/api/cities/{id}/refresh", post(refresh_one))
        .route("/api/refresh-all", post(refresh_all))
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct RefreshAllResponse {
    message: String,
    successful: usize,
    failed: usize,
}

async fn list_cities(State(state): State<AppState>) -> Json<Vec<CityWithData>> {
    // ---
    debug!("GET /api/cities");
    let store = &state.store;

    let cities = store
        .cities()
        .into_iter()
        .map(|city| CityWithData {
            air_quality: store.air_quality(city.id),
            weather: store.weather(city.id),
            city,
        })
        .collect();

    Json(cities)
}

async fn city_detail(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Response {
    // ---
    let Ok(Path(id)) = id else {
        return error_response(StatusCode::NOT_FOUND, "City not found", None);
    };
    debug!("GET /api/cities/{}", id);
    let store = &state.store;

    let Some(city) = store.city(id) else {
        return error_response(StatusCode::NOT_FOUND, "City not found", None);
    };

    let detail = CityDetail {
        air_quality: store.air_quality(id),
        weather: store.weather(id),
        hourly_forecast: store.hourly_forecast(id),
        is_favorite: store.is_city_favorited(id),
        city,
    };
    (StatusCode::OK, Json(detail)).into_response()
}

async fn refresh_one(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Response {
    // ---
    let Ok(Path(id)) = id else {
        return error_response(StatusCode::NOT_FOUND, "City not found", None);
    };
    info!("POST /api/cities/{}/refresh", id);

    let Some(city) = state.store.city(id) else {
        return error_response(StatusCode::NOT_FOUND, "City not found", None);
    };

    match refresh_city(&state, &city).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Data refreshed successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to refresh {}: {}", city.name, e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to refresh city data",
                Some(e.to_string()),
            )
        }
    }
}

async fn refresh_all(State(state): State<AppState>) -> Json<RefreshAllResponse> {
    // ---
    info!("POST /api/refresh-all - Starting");

    let mut tasks = JoinSet::new();
    for city in state.store.cities() {
        let state = state.clone();
        tasks.spawn(async move {
            let result = refresh_city(&state, &city).await;
            if let Err(e) = &result {
                warn!("Refresh of {} failed: {}", city.name, e);
            }
            result
        });
    }

    let mut successful = 0;
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => successful += 1,
            Ok(Err(_)) => failed += 1,
            Err(e) => {
                error!("Refresh task aborted: {}", e);
                failed += 1;
            }
        }
    }

    info!("Refresh completed: {} successful, {} failed", successful, failed);
    Json(RefreshAllResponse {
        message: format!("Refresh completed: {successful} successful, {failed} failed"),
        successful,
        failed,
    })
}

/// Fetch fresh readings for `city` and replace what the store holds for it.
///
/// Nothing is written unless all three provider calls succeed and the
/// reading passes validation.
async fn refresh_city(state: &AppState, city: &City) -> Result<(), ProviderError> {
    // ---
    let provider = &state.provider;

    // Step 1: Fetch everything from the provider
    debug!("Refreshing {} - Step 1", city.name);
    let (sample, conditions, slots) = tokio::try_join!(
        provider.air_pollution(city.lat, city.lon),
        provider.current_weather(city.lat, city.lon),
        provider.forecast(city.lat, city.lon),
    )?;

    // Step 2: Derive AQI, main pollutant and the projected forecast
    debug!("Refreshing {} - Step 2", city.name);
    let aqi = pm25_to_aqi(sample.reading.pm2_5)?;
    let main = main_pollutant(&sample.reading)?;
    let projected = forecast::project(&sample.reading, &slots, &mut rand::thread_rng())?;

    // Step 3: Store
    debug!("Refreshing {} - Step 3", city.name);
    let store = &state.store;
    store.upsert_air_quality(
        city.id,
        AirQualityUpdate {
            aqi,
            main_pollutant: main,
            pollutants: sample.reading,
            timestamp: sample.measured_at,
        },
    );
    store.upsert_weather(city.id, conditions.weather);
    store.replace_hourly_forecast(
        city.id,
        projected
            .into_iter()
            .map(|hour| HourlyForecast::from_projection(city.id, hour))
            .collect(),
    );

    info!("Refreshed {}: AQI {} ({})", city.name, aqi, main);
    Ok(())
}
