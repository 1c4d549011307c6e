//! Air quality and weather service for Nepal and worldwide locations.
//!
//! The core is the EPA PM2.5 AQI conversion ([`aqi`]), the main-pollutant
//! selector ([`pollutants`]) and the synthetic forecast projector
//! ([`forecast`]). Around it sit a thin provider client, an in-memory store
//! and the axum routes that serve both.

pub mod aqi;
pub mod catalog;
pub mod config;
pub mod forecast;
pub mod models;
pub mod pollutants;
pub mod provider;
pub mod routes;
pub mod store;

pub use aqi::{pm25_to_aqi, AqiError, AqiLevel};
pub use config::Config;
pub use forecast::{project, ForecastSlot, ProjectedHour};
pub use pollutants::{main_pollutant, MainPollutant, PollutantReading};
pub use provider::{OpenWeatherClient, ProviderError};
pub use routes::AppState;
pub use store::MemStore;
