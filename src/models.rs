//! Records served by the API and held in the store.
//!
//! JSON field names are camelCase; the nested pollutant map keeps the
//! provider's snake_case component names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aqi::{AqiLevel, LevelInfo};
use crate::forecast::ProjectedHour;
use crate::pollutants::{MainPollutant, PollutantReading};

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    // ---
    pub id: Uuid,
    pub name: String,
    pub province: String,
    pub lat: f64,
    pub lon: f64,
}

/// Fields accepted when creating a city.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub province: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current air quality for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    // ---
    pub id: Uuid,
    pub city_id: Uuid,
    pub aqi: u16,
    pub main_pollutant: MainPollutant,
    pub pollutants: PollutantReading,
    pub timestamp: DateTime<Utc>,
}

/// Air quality computed from a fresh reading, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityUpdate {
    pub aqi: u16,
    pub main_pollutant: MainPollutant,
    pub pollutants: PollutantReading,
    pub timestamp: DateTime<Utc>,
}

/// Current weather, already converted to display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    // ---
    pub temperature: i32,
    pub feels_like: i32,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Pressure, hPa.
    pub pressure: f64,
    /// Wind speed, km/h.
    pub wind_speed: i32,
    pub wind_direction: f64,
    /// Visibility, meters.
    pub visibility: f64,
    pub description: String,
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

/// Stored weather record for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    pub id: Uuid,
    pub city_id: Uuid,
    #[serde(flatten)]
    pub weather: Weather,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    // ---
    pub id: Uuid,
    pub city_id: Uuid,
    pub time: DateTime<Utc>,
    pub aqi: u16,
    pub temperature: i32,
    pub icon: String,
    pub pollutants: PollutantReading,
}

impl HourlyForecast {
    pub fn from_projection(city_id: Uuid, hour: ProjectedHour) -> Self {
        // ---
        HourlyForecast {
            id: Uuid::new_v4(),
            city_id,
            time: hour.time,
            aqi: hour.aqi,
            temperature: hour.temperature.round() as i32,
            icon: hour.icon,
            pollutants: hour.pollutants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteLocation {
    // ---
    pub id: Uuid,
    pub city_id: Uuid,
    /// "Home", "Work", "Kids School", ...
    pub custom_label: String,
    pub icon: Option<String>,
    pub is_current_location: bool,
    /// Sort key.
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub city_id: Uuid,
    pub custom_label: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub is_current_location: bool,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdate {
    pub custom_label: Option<String>,
    pub icon: Option<String>,
    pub is_current_location: Option<bool>,
    pub order: Option<u32>,
}

/// A favorite joined with its city and that city's cached readings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWithData {
    #[serde(flatten)]
    pub favorite: FavoriteLocation,
    pub city: Option<City>,
    pub air_quality: Option<AirQuality>,
    pub weather: Option<CityWeather>,
}

/// A city with whatever readings have been cached for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWithData {
    // ---
    #[serde(flatten)]
    pub city: City,
    pub air_quality: Option<AirQuality>,
    pub weather: Option<CityWeather>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    // ---
    #[serde(flatten)]
    pub city: City,
    pub air_quality: Option<AirQuality>,
    pub weather: Option<CityWeather>,
    pub hourly_forecast: Vec<HourlyForecast>,
    pub is_favorite: bool,
}

/// Air quality block of an ad-hoc location report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAirQuality {
    pub aqi: u16,
    pub level: LevelInfo,
    pub main_pollutant: MainPollutant,
    pub pollutants: PollutantReading,
    pub timestamp: DateTime<Utc>,
}

/// Report for arbitrary coordinates; never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    // ---
    pub id: &'static str,
    pub name: String,
    /// Formatted coordinates, shown where a city would show its province.
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    pub air_quality: LocationAirQuality,
    pub weather: Weather,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCity {
    pub rank: usize,
    pub city: String,
    pub country: String,
    pub aqi: u16,
    pub pm25: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    // ---
    pub cleanest: Vec<RankedCity>,
    pub polluted: Vec<RankedCity>,
    pub total_cities: usize,
    pub last_updated: DateTime<Utc>,
}

/// Response body for a standalone concentration conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiConversion {
    pub pm25: f64,
    pub aqi: u16,
    pub level: LevelInfo,
    pub recommendations: &'static [&'static str],
}

impl AqiConversion {
    pub fn new(pm25: f64, aqi: u16) -> Self {
        // ---
        let level = AqiLevel::from_aqi(aqi);
        AqiConversion {
            pm25,
            aqi,
            level: level.into(),
            recommendations: level.recommendations(),
        }
    }
}
