//! End-to-end tests: the real router served on an ephemeral port, talking
//! to a fake provider that is also served locally.
//!
//! The fake provider reports a PM2.5 concentration equal to `|lat|`, so each
//! location gets a different, predictable AQI.

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use nepal_airwatch::{pm25_to_aqi, routes, AppState, Config, MemStore, OpenWeatherClient};

// ---

#[derive(Deserialize)]
struct Coords {
    lat: f64,
    cnt: Option<usize>,
}

async fn fake_air(Query(c): Query<Coords>) -> Json<Value> {
    Json(json!({
        "coord": { "lat": c.lat, "lon": 0.0 },
        "list": [{
            "main": { "aqi": 2 },
            "components": {
                "co": 2.0, "no": 0.1, "no2": 8.0, "o3": 60.0, "so2": 2.0,
                "pm2_5": c.lat.abs(), "pm10": 20.0, "nh3": 1.0
            },
            "dt": 1742993100
        }]
    }))
}

async fn fake_weather() -> Json<Value> {
    Json(json!({
        "name": "Testville",
        "main": { "temp": 18.6, "feels_like": 17.4, "humidity": 55, "pressure": 1015 },
        "wind": { "speed": 2.5, "deg": 270 },
        "visibility": 8000,
        "weather": [{ "main": "Haze", "description": "haze", "icon": "50d" }],
        "dt": 1742993100
    }))
}

async fn fake_forecast(Query(c): Query<Coords>) -> Json<Value> {
    let list: Vec<Value> = (0..c.cnt.unwrap_or(4))
        .map(|i| {
            json!({
                "dt": 1742993100 + i as i64 * 10800,
                "main": { "temp": 15.0 + i as f64 },
                "weather": [{ "icon": "01d" }]
            })
        })
        .collect();
    Json(json!({ "cnt": list.len(), "list": list }))
}

fn healthy_provider() -> Router {
    Router::new()
        .route("/air_pollution", get(fake_air))
        .route("/weather", get(fake_weather))
        .route("/forecast", get(fake_forecast))
}

fn broken_provider() -> Router {
    Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR })
}

async fn serve(app: Router) -> Result<String> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(format!("http://{addr}"))
}

/// Start the service against `provider` and return its base URL.
async fn start(provider: Router) -> Result<String> {
    // ---
    let upstream = serve(provider).await?;
    let config = Config {
        api_key: "test-key".to_string(),
        api_base_url: upstream,
        port: 0,
        forecast_count: 8,
        http_timeout_secs: 5,
        rankings_ttl_secs: 600,
    };
    let state = AppState {
        store: Arc::new(MemStore::seeded()),
        provider: OpenWeatherClient::new(&config)?,
        config,
    };
    serve(routes::router(state)).await
}

async fn city_id(client: &Client, base: &str, name: &str) -> Result<String> {
    // ---
    let cities: Vec<Value> = client
        .get(format!("{base}/api/cities"))
        .send()
        .await?
        .json()
        .await?;
    let city = cities
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("{} not seeded", name));
    Ok(city["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn health_reports_seeded_cities() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let body: Value = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["cities"], 34);
    Ok(())
}

#[tokio::test]
async fn refresh_populates_city_detail() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();
    let id = city_id(&client, &base, "Kathmandu").await?;

    let before: Value = client
        .get(format!("{base}/api/cities/{id}"))
        .send()
        .await?
        .json()
        .await?;
    assert!(before["airQuality"].is_null());

    let response = client
        .post(format!("{base}/api/cities/{id}/refresh"))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let detail: Value = client
        .get(format!("{base}/api/cities/{id}"))
        .send()
        .await?
        .json()
        .await?;

    let pm25 = 27.7172;
    let expected = pm25_to_aqi(pm25)?;
    assert_eq!(detail["airQuality"]["aqi"], expected);
    assert_eq!(detail["airQuality"]["mainPollutant"], "PM2.5");
    assert_eq!(detail["airQuality"]["pollutants"]["pm2_5"], pm25);
    assert_eq!(detail["weather"]["temperature"], 19);
    assert_eq!(detail["weather"]["windSpeed"], 9);
    assert_eq!(detail["isFavorite"], false);

    let forecast = detail["hourlyForecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 8);
    for hour in forecast {
        let scaled = hour["pollutants"]["pm2_5"].as_f64().unwrap();
        assert!(scaled >= pm25 * 0.8 - 1e-9 && scaled <= pm25 * 1.2 + 1e-9);
        assert_eq!(hour["aqi"], pm25_to_aqi(scaled)?);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_city_is_not_found() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();
    let missing = "00000000-0000-4000-8000-000000000000";

    let detail = client
        .get(format!("{base}/api/cities/{missing}"))
        .send()
        .await?;
    assert_eq!(detail.status(), 404);
    let body: Value = detail.json().await?;
    assert_eq!(body["message"], "City not found");

    let refresh = client
        .post(format!("{base}/api/cities/{missing}/refresh"))
        .send()
        .await?;
    assert_eq!(refresh.status(), 404);
    Ok(())
}

#[tokio::test]
async fn refresh_all_counts_results() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let body: Value = Client::new()
        .post(format!("{base}/api/refresh-all"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["successful"], 34);
    assert_eq!(body["failed"], 0);
    Ok(())
}

#[tokio::test]
async fn upstream_failure_leaves_store_untouched() -> Result<()> {
    // ---
    let base = start(broken_provider()).await?;
    let client = Client::new();
    let id = city_id(&client, &base, "Pokhara").await?;

    let response = client
        .post(format!("{base}/api/cities/{id}/refresh"))
        .send()
        .await?;
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    assert_eq!(body["message"], "Failed to refresh city data");
    assert!(body["error"].as_str().unwrap().contains("500"));

    let all: Value = client
        .post(format!("{base}/api/refresh-all"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(all["successful"], 0);
    assert_eq!(all["failed"], 34);

    let detail: Value = client
        .get(format!("{base}/api/cities/{id}"))
        .send()
        .await?
        .json()
        .await?;
    assert!(detail["airQuality"].is_null());
    assert!(detail["hourlyForecast"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn location_report() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();

    let missing = client
        .get(format!("{base}/api/location?lat=27.7"))
        .send()
        .await?;
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json().await?;
    assert_eq!(body["message"], "Latitude and longitude are required");

    let report: Value = client
        .get(format!("{base}/api/location?lat=27.7172&lon=85.324"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(report["id"], "current-location");
    assert_eq!(report["name"], "Testville");
    assert_eq!(report["province"], "27.7172, 85.3240");
    assert_eq!(report["airQuality"]["aqi"], pm25_to_aqi(27.7172)?);
    assert_eq!(report["airQuality"]["level"]["label"], "Moderate");
    Ok(())
}

#[tokio::test]
async fn rankings_sorted_by_aqi() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let body: Value = Client::new()
        .get(format!("{base}/api/rankings"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["totalCities"], 20);
    // Lowest |lat| is Lagos, highest is Reykjavik
    assert_eq!(body["cleanest"][0]["city"], "Lagos");
    assert_eq!(body["cleanest"][0]["rank"], 1);
    assert_eq!(body["polluted"][0]["city"], "Reykjavik");
    assert_eq!(body["cleanest"].as_array().unwrap().len(), 10);
    assert_eq!(body["polluted"].as_array().unwrap().len(), 10);
    Ok(())
}

#[tokio::test]
async fn aqi_conversion_endpoint() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();

    let body: Value = client
        .get(format!("{base}/api/aqi?pm25=150.4"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["aqi"], 226);
    assert_eq!(body["level"]["label"], "Very Unhealthy");

    let negative = client.get(format!("{base}/api/aqi?pm25=-1")).send().await?;
    assert_eq!(negative.status(), 400);

    let garbage = client.get(format!("{base}/api/aqi?pm25=lots")).send().await?;
    assert_eq!(garbage.status(), 400);
    Ok(())
}

#[tokio::test]
async fn favorites_lifecycle() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();
    let id = city_id(&client, &base, "Lalitpur").await?;

    let created = client
        .post(format!("{base}/api/favorites"))
        .json(&json!({ "cityId": id, "customLabel": "Home", "icon": "📍" }))
        .send()
        .await?;
    assert_eq!(created.status(), 201);
    let favorite: Value = created.json().await?;
    let favorite_id = favorite["id"].as_str().unwrap().to_string();

    let listed: Vec<Value> = client
        .get(format!("{base}/api/favorites"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["customLabel"], "Home");
    assert_eq!(listed[0]["city"]["name"], "Lalitpur");

    let patched: Value = client
        .patch(format!("{base}/api/favorites/{favorite_id}"))
        .json(&json!({ "customLabel": "Office" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(patched["customLabel"], "Office");

    for _ in 0..4 {
        let extra = client
            .post(format!("{base}/api/favorites"))
            .json(&json!({ "cityId": id, "customLabel": "Extra" }))
            .send()
            .await?;
        assert_eq!(extra.status(), 201);
    }
    let over_limit = client
        .post(format!("{base}/api/favorites"))
        .json(&json!({ "cityId": id, "customLabel": "Sixth" }))
        .send()
        .await?;
    assert_eq!(over_limit.status(), 409);

    let deleted = client
        .delete(format!("{base}/api/favorites/{favorite_id}"))
        .send()
        .await?;
    assert_eq!(deleted.status(), 204);

    let again = client
        .delete(format!("{base}/api/favorites/{favorite_id}"))
        .send()
        .await?;
    assert_eq!(again.status(), 404);
    Ok(())
}

#[tokio::test]
async fn malformed_city_id_is_json_not_found() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();

    for request in [
        client.get(format!("{base}/api/cities/not-a-uuid")),
        client.post(format!("{base}/api/cities/not-a-uuid/refresh")),
    ] {
        let response = request.send().await?;
        assert_eq!(response.status(), 404);
        let content_type = response.headers()["content-type"].to_str()?.to_string();
        assert!(content_type.starts_with("application/json"));
        let body: Value = response.json().await?;
        assert_eq!(body["message"], "City not found");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_favorite_requests_are_json_errors() -> Result<()> {
    // ---
    let base = start(healthy_provider()).await?;
    let client = Client::new();

    let bad_body = client
        .post(format!("{base}/api/favorites"))
        .json(&json!({ "customLabel": 7 }))
        .send()
        .await?;
    assert_eq!(bad_body.status(), 400);
    let content_type = bad_body.headers()["content-type"].to_str()?.to_string();
    assert!(content_type.starts_with("application/json"));
    let body: Value = bad_body.json().await?;
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["error"].is_string());

    let no_body = client.post(format!("{base}/api/favorites")).send().await?;
    assert_eq!(no_body.status(), 400);

    let bad_id = client
        .delete(format!("{base}/api/favorites/42"))
        .send()
        .await?;
    assert_eq!(bad_id.status(), 404);
    let body: Value = bad_id.json().await?;
    assert_eq!(body["message"], "Favorite not found");

    let bad_patch = client
        .patch(format!("{base}/api/favorites/42"))
        .json(&json!({ "customLabel": "Office" }))
        .send()
        .await?;
    assert_eq!(bad_patch.status(), 404);
    Ok(())
}
