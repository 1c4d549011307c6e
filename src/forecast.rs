//! Synthetic hourly forecast built from the current reading.
//!
//! This is a display approximation, not a predictive model: each timestep
//! takes the current pollutant reading and scales it by its own random
//! factor drawn uniformly from [`JITTER_MIN`]..=[`JITTER_MAX`].

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::aqi::{pm25_to_aqi, AqiError};
use crate::pollutants::PollutantReading;

// ---

pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;

/// A future timestep with the weather values the provider forecasts for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    // ---
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub icon: String,
}

/// One projected timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedHour {
    // ---
    pub time: DateTime<Utc>,
    pub aqi: u16,
    pub temperature: f64,
    pub icon: String,
    pub pollutants: PollutantReading,
    /// Multiplier applied to the current reading for this step.
    pub factor: f64,
}

/// Project `current` across `slots`, one independent jitter draw per slot.
///
/// Callers pass their own random source; the service uses
/// `rand::thread_rng()` and tests use a seeded `StdRng`.
pub fn project<R>(
    current: &PollutantReading,
    slots: &[ForecastSlot],
    rng: &mut R,
) -> Result<Vec<ProjectedHour>, AqiError>
where
    R: Rng + ?Sized,
{
    // ---
    slots
        .iter()
        .map(|slot| {
            let factor = rng.gen_range(JITTER_MIN..=JITTER_MAX);
            let pollutants = current.scaled(factor);
            let aqi = pm25_to_aqi(pollutants.pm2_5)?;

            Ok(ProjectedHour {
                time: slot.time,
                aqi,
                temperature: slot.temperature,
                icon: slot.icon.clone(),
                pollutants,
                factor,
            })
        })
        .collect()
}
