//! Global cleanest / most polluted city rankings.

use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::AppState;
use crate::aqi::pm25_to_aqi;
use crate::catalog::{WorldCity, WORLD_CITIES};
use crate::models::{RankedCity, Rankings};

// ---

/// Entries in each of the cleanest and most polluted lists.
const TOP_N: usize = 10;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/rankings", get(handler))
}

async fn handler(State(state): State<AppState>) -> Json<Rankings> {
    // ---
    info!("GET /api/rankings");

    let ttl = Duration::from_secs(state.config.rankings_ttl_secs);
    if let Some(cached) = state.store.cached_rankings(ttl) {
        debug!("Serving cached rankings from {}", cached.last_updated);
        return Json(cached);
    }

    let samples = fetch_world_samples(&state).await;
    let rankings = build_rankings(samples, Utc::now());

    // An empty snapshot means the provider was unreachable; retry next time
    if rankings.total_cities > 0 {
        state.store.cache_rankings(rankings.clone());
    }
    info!("Ranked {} cities", rankings.total_cities);
    Json(rankings)
}

/// Unranked result for one world city.
#[derive(Debug, Clone, PartialEq)]
struct CitySample {
    city: &'static str,
    country: &'static str,
    aqi: u16,
    pm25: f64,
}

/// Fetch every world city concurrently; cities that fail are left out.
async fn fetch_world_samples(state: &AppState) -> Vec<CitySample> {
    // ---
    let mut tasks = JoinSet::new();
    for city in WORLD_CITIES {
        let provider = state.provider.clone();
        tasks.spawn(async move {
            let sample = provider.air_pollution(city.lat, city.lon).await;
            (city, sample)
        });
    }

    let mut samples = Vec::with_capacity(WORLD_CITIES.len());
    while let Some(joined) = tasks.join_next().await {
        let Ok((city, result)) = joined else {
            warn!("Rankings task aborted");
            continue;
        };
        let scored = result.and_then(|sample| {
            let pm25 = sample.reading.pm2_5;
            Ok((pm25_to_aqi(pm25)?, pm25))
        });
        match scored {
            Ok((aqi, pm25)) => samples.push(sample_for(&city, aqi, pm25)),
            Err(e) => warn!("Skipping {} in rankings: {}", city.name, e),
        }
    }
    samples
}

fn sample_for(city: &WorldCity, aqi: u16, pm25: f64) -> CitySample {
    CitySample {
        city: city.name,
        country: city.country,
        aqi,
        pm25,
    }
}

/// Sort ascending by AQI (name breaks ties) and cut both ends of the list.
fn build_rankings(mut samples: Vec<CitySample>, now: DateTime<Utc>) -> Rankings {
    // ---
    samples.sort_by(|a, b| a.aqi.cmp(&b.aqi).then_with(|| a.city.cmp(b.city)));

    let ranked = |(index, sample): (usize, &CitySample)| RankedCity {
        rank: index + 1,
        city: sample.city.to_string(),
        country: sample.country.to_string(),
        aqi: sample.aqi,
        pm25: sample.pm25,
    };

    let cleanest = samples.iter().take(TOP_N).enumerate().map(ranked).collect();
    let polluted = samples
        .iter()
        .rev()
        .take(TOP_N)
        .enumerate()
        .map(ranked)
        .collect();

    Rankings {
        cleanest,
        polluted,
        total_cities: samples.len(),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn sample(city: &'static str, aqi: u16) -> CitySample {
        CitySample {
            city,
            country: "Somewhere",
            aqi,
            pm25: f64::from(aqi) / 10.0,
        }
    }

    #[test]
    fn test_rankings_order_and_ranks() {
        // ---
        let samples = vec![
            sample("Delhi", 180),
            sample("Oslo", 12),
            sample("Lagos", 95),
            sample("Zurich", 20),
        ];
        let rankings = build_rankings(samples, Utc::now());

        assert_eq!(rankings.total_cities, 4);
        let cleanest: Vec<_> = rankings.cleanest.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(cleanest, vec!["Oslo", "Zurich", "Lagos", "Delhi"]);
        let polluted: Vec<_> = rankings.polluted.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(polluted, vec!["Delhi", "Lagos", "Zurich", "Oslo"]);
        assert_eq!(rankings.cleanest[0].rank, 1);
        assert_eq!(rankings.polluted[3].rank, 4);
    }

    #[test]
    fn test_rankings_are_capped() {
        // ---
        let names = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
        ];
        let samples = names
            .iter()
            .enumerate()
            .map(|(i, name)| sample(*name, i as u16 * 10))
            .collect();
        let rankings = build_rankings(samples, Utc::now());

        assert_eq!(rankings.total_cities, 15);
        assert_eq!(rankings.cleanest.len(), TOP_N);
        assert_eq!(rankings.polluted.len(), TOP_N);
        assert_eq!(rankings.cleanest[9].city, "J");
        assert_eq!(rankings.polluted[0].city, "O");
        assert_eq!(rankings.polluted[9].city, "F");
    }

    #[test]
    fn test_ties_sorted_by_name() {
        // ---
        let rankings = build_rankings(vec![sample("Sydney", 30), sample("Oslo", 30)], Utc::now());
        assert_eq!(rankings.cleanest[0].city, "Oslo");
    }

    #[test]
    fn test_empty_rankings() {
        // ---
        let rankings = build_rankings(Vec::new(), Utc::now());
        assert_eq!(rankings.total_cities, 0);
        assert!(rankings.cleanest.is_empty());
        assert!(rankings.polluted.is_empty());
    }
}
