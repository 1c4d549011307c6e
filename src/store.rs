//! In-memory repository for cities, their cached readings, favorites and the
//! rankings snapshot.
//!
//! Everything lives behind one `RwLock`; no lock is ever held across an
//! `.await`, so handlers call these methods directly.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::NEPAL_CITIES;
use crate::models::{
    AirQuality, AirQualityUpdate, City, CityWeather, FavoriteLocation,
    FavoriteUpdate, HourlyForecast, NewCity, NewFavorite, Rankings, Weather,
};

// ---

/// Maximum number of favorite locations.
pub const MAX_FAVORITES: usize = 5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    // ---
    #[error("at most {0} favorite locations are allowed")]
    FavoriteLimit(usize),

    #[error("city {0} not found")]
    UnknownCity(Uuid),
}

#[derive(Default)]
struct Inner {
    // ---
    /// Kept in insertion order.
    cities: Vec<City>,
    air_quality: HashMap<Uuid, AirQuality>,
    weather: HashMap<Uuid, CityWeather>,
    forecasts: HashMap<Uuid, Vec<HourlyForecast>>,
    favorites: HashMap<Uuid, FavoriteLocation>,
    rankings: Option<(Instant, Rankings)>,
}

#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    /// A store seeded with the Nepal city catalog.
    pub fn seeded() -> Self {
        // ---
        let store = MemStore::default();
        for seed in NEPAL_CITIES.iter() {
            store.create_city(NewCity {
                name: seed.name.to_string(),
                province: seed.province.to_string(),
                lat: seed.lat,
                lon: seed.lon,
            });
        }
        tracing::debug!("Seeded store with {} cities", NEPAL_CITIES.len());
        store
    }

    // Every mutation is a single insert, remove or field assignment, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Cities

    pub fn cities(&self) -> Vec<City> {
        self.read().cities.clone()
    }

    pub fn city(&self, id: Uuid) -> Option<City> {
        self.read().cities.iter().find(|c| c.id == id).cloned()
    }

    pub fn create_city(&self, new: NewCity) -> City {
        // ---
        let city = City {
            id: Uuid::new_v4(),
            name: new.name,
            province: new.province,
            lat: new.lat,
            lon: new.lon,
        };
        self.write().cities.push(city.clone());
        city
    }

    // --- Readings

    pub fn air_quality(&self, city_id: Uuid) -> Option<AirQuality> {
        self.read().air_quality.get(&city_id).cloned()
    }

    /// Replace the city's air quality, keeping the existing record id.
    pub fn upsert_air_quality(&self, city_id: Uuid, update: AirQualityUpdate) -> AirQuality {
        // ---
        let mut inner = self.write();
        let id = inner
            .air_quality
            .get(&city_id)
            .map_or_else(Uuid::new_v4, |existing| existing.id);

        let record = AirQuality {
            id,
            city_id,
            aqi: update.aqi,
            main_pollutant: update.main_pollutant,
            pollutants: update.pollutants,
            timestamp: update.timestamp,
        };
        inner.air_quality.insert(city_id, record.clone());
        record
    }

    pub fn weather(&self, city_id: Uuid) -> Option<CityWeather> {
        self.read().weather.get(&city_id).cloned()
    }

    /// Replace the city's weather, keeping the existing record id.
    pub fn upsert_weather(&self, city_id: Uuid, weather: Weather) -> CityWeather {
        // ---
        let mut inner = self.write();
        let id = inner
            .weather
            .get(&city_id)
            .map_or_else(Uuid::new_v4, |existing| existing.id);

        let record = CityWeather {
            id,
            city_id,
            weather,
        };
        inner.weather.insert(city_id, record.clone());
        record
    }

    pub fn hourly_forecast(&self, city_id: Uuid) -> Vec<HourlyForecast> {
        self.read()
            .forecasts
            .get(&city_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn replace_hourly_forecast(&self, city_id: Uuid, forecast: Vec<HourlyForecast>) {
        self.write().forecasts.insert(city_id, forecast);
    }

    // --- Favorites

    /// All favorites ordered by their `order` key, oldest first on ties.
    pub fn favorites(&self) -> Vec<FavoriteLocation> {
        // ---
        let mut favorites: Vec<_> = self.read().favorites.values().cloned().collect();
        favorites.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
        favorites
    }

    /// Add a favorite. Without an explicit `order` it goes to the end.
    pub fn create_favorite(&self, new: NewFavorite) -> Result<FavoriteLocation, StoreError> {
        // ---
        let mut inner = self.write();

        if !inner.cities.iter().any(|c| c.id == new.city_id) {
            return Err(StoreError::UnknownCity(new.city_id));
        }
        if inner.favorites.len() >= MAX_FAVORITES {
            return Err(StoreError::FavoriteLimit(MAX_FAVORITES));
        }

        let order = new.order.unwrap_or(inner.favorites.len() as u32);
        let favorite = FavoriteLocation {
            id: Uuid::new_v4(),
            city_id: new.city_id,
            custom_label: new.custom_label,
            icon: new.icon,
            is_current_location: new.is_current_location,
            order,
            created_at: Utc::now(),
        };
        inner.favorites.insert(favorite.id, favorite.clone());
        Ok(favorite)
    }

    pub fn update_favorite(&self, id: Uuid, update: FavoriteUpdate) -> Option<FavoriteLocation> {
        // ---
        let mut inner = self.write();
        let favorite = inner.favorites.get_mut(&id)?;

        if let Some(label) = update.custom_label {
            favorite.custom_label = label;
        }
        if let Some(icon) = update.icon {
            favorite.icon = Some(icon);
        }
        if let Some(current) = update.is_current_location {
            favorite.is_current_location = current;
        }
        if let Some(order) = update.order {
            favorite.order = order;
        }
        Some(favorite.clone())
    }

    /// Returns `false` if no such favorite existed.
    pub fn delete_favorite(&self, id: Uuid) -> bool {
        self.write().favorites.remove(&id).is_some()
    }

    pub fn is_city_favorited(&self, city_id: Uuid) -> bool {
        self.read().favorites.values().any(|f| f.city_id == city_id)
    }

    // --- Rankings cache

    /// The cached rankings if they were stored less than `ttl` ago.
    pub fn cached_rankings(&self, ttl: Duration) -> Option<Rankings> {
        // ---
        match &self.read().rankings {
            Some((stored_at, rankings)) if stored_at.elapsed() < ttl => Some(rankings.clone()),
            _ => None,
        }
    }

    pub fn cache_rankings(&self, rankings: Rankings) {
        self.write().rankings = Some((Instant::now(), rankings));
    }
}
