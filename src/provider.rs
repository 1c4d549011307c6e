//! Client for the OpenWeather-compatible air pollution and weather API.
//!
//! Three endpoints are used, all keyed by coordinates:
//! - `/air_pollution`: current pollutant components
//! - `/weather?units=metric`: current conditions
//! - `/forecast?units=metric&cnt=N`: future timesteps (temperature + icon)
//!
//! Wire types stay private to this module; callers get validated
//! [`PollutantReading`]s, display-ready [`Weather`] and [`ForecastSlot`]s.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::aqi::AqiError;
use crate::forecast::ForecastSlot;
use crate::models::Weather;
use crate::pollutants::{PollutantReading, RawComponents};
use crate::Config;

// ---

#[derive(Debug, Error)]
pub enum ProviderError {
    // ---
    #[error("request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("{0} response contained no entries")]
    EmptyResponse(&'static str),

    #[error("malformed {endpoint} response: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: &'static str,
    },

    #[error("unusable pollutant reading: {0}")]
    Reading(#[from] AqiError),
}

/// Current pollutant reading plus the time the provider measured it.
#[derive(Debug, Clone, PartialEq)]
pub struct AirSample {
    pub reading: PollutantReading,
    pub measured_at: DateTime<Utc>,
}

/// Current weather plus the provider's name for the location, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub place_name: Option<String>,
    pub weather: Weather,
}

// --- Wire types

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    components: RawComponents,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: Option<String>,
    main: CurrentMain,
    wind: Wind,
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<Condition>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    /// m/s with metric units.
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(default)]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: ForecastMain,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

fn timestamp(dt: i64, endpoint: &'static str) -> Result<DateTime<Utc>, ProviderError> {
    DateTime::from_timestamp(dt, 0).ok_or(ProviderError::Malformed {
        endpoint,
        reason: "timestamp out of range",
    })
}

impl AirPollutionResponse {
    fn into_sample(self) -> Result<AirSample, ProviderError> {
        // ---
        let entry = self
            .list
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse("air_pollution"))?;

        Ok(AirSample {
            reading: PollutantReading::try_from(entry.components)?,
            measured_at: timestamp(entry.dt, "air_pollution")?,
        })
    }
}

impl CurrentResponse {
    fn into_conditions(self) -> Result<CurrentConditions, ProviderError> {
        // ---
        let condition = self.weather.into_iter().next().ok_or(ProviderError::Malformed {
            endpoint: "weather",
            reason: "no weather condition",
        })?;

        let weather = Weather {
            temperature: self.main.temp.round() as i32,
            feels_like: self.main.feels_like.round() as i32,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: (self.wind.speed * 3.6).round() as i32, // m/s -> km/h
            wind_direction: self.wind.deg,
            visibility: self.visibility.unwrap_or_default(),
            description: condition.description,
            icon: condition.icon,
            timestamp: timestamp(self.dt, "weather")?,
        };

        Ok(CurrentConditions {
            place_name: self.name.filter(|n| !n.is_empty()),
            weather,
        })
    }
}

impl ForecastResponse {
    /// Entries without a weather condition are skipped.
    fn into_slots(self) -> Result<Vec<ForecastSlot>, ProviderError> {
        // ---
        let mut slots = Vec::with_capacity(self.list.len());
        for entry in self.list {
            let Some(condition) = entry.weather.into_iter().next() else {
                tracing::debug!("Skipping forecast entry {} without condition", entry.dt);
                continue;
            };
            slots.push(ForecastSlot {
                time: timestamp(entry.dt, "forecast")?,
                temperature: entry.main.temp,
                icon: condition.icon,
            });
        }
        Ok(slots)
    }
}

// --- Client

/// HTTP client for the provider. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    // ---
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    forecast_count: u32,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        // ---
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(OpenWeatherClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            forecast_count: config.forecast_count,
        })
    }

    pub async fn air_pollution(&self, lat: f64, lon: f64) -> Result<AirSample, ProviderError> {
        // ---
        let response: AirPollutionResponse = self
            .get_json("air_pollution", lat, lon, &[])
            .await?;
        response.into_sample()
    }

    pub async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, ProviderError> {
        // ---
        let response: CurrentResponse = self
            .get_json("weather", lat, lon, &[("units", "metric".to_string())])
            .await?;
        response.into_conditions()
    }

    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastSlot>, ProviderError> {
        // ---
        let extra = [
            ("units", "metric".to_string()),
            ("cnt", self.forecast_count.to_string()),
        ];
        let response: ForecastResponse = self.get_json("forecast", lat, lon, &extra).await?;
        response.into_slots()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        lat: f64,
        lon: f64,
        extra: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        // ---
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("Fetching {} for ({}, {})", endpoint, lat, lon);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .query(extra)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Provider {} returned {}", endpoint, status);
            return Err(ProviderError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
