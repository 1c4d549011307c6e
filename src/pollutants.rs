//! Pollutant readings and main-pollutant selection.

use serde::{Deserialize, Serialize};

use crate::aqi::AqiError;

// ---

/// Concentrations of the eight pollutants reported upstream.
///
/// CO is in the provider's mg/m³-scale units, everything else in μg/m³.
/// Field names match the provider's `components` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    // ---
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

/// Pollutant components as they arrive from the provider, any of which may
/// be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComponents {
    // ---
    pub co: Option<f64>,
    pub no: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub nh3: Option<f64>,
}

impl TryFrom<RawComponents> for PollutantReading {
    type Error = AqiError;

    /// Fails on the first absent, negative or non-finite component.
    fn try_from(raw: RawComponents) -> Result<Self, Self::Error> {
        // ---
        fn require(value: Option<f64>, name: &'static str) -> Result<f64, AqiError> {
            let value = value.ok_or(AqiError::MissingPollutant(name))?;
            if !value.is_finite() || value < 0.0 {
                return Err(AqiError::InvalidConcentration {
                    pollutant: name,
                    value,
                });
            }
            Ok(value)
        }

        Ok(PollutantReading {
            co: require(raw.co, "CO")?,
            no: require(raw.no, "NO")?,
            no2: require(raw.no2, "NO2")?,
            o3: require(raw.o3, "O3")?,
            so2: require(raw.so2, "SO2")?,
            pm2_5: require(raw.pm2_5, "PM2.5")?,
            pm10: require(raw.pm10, "PM10")?,
            nh3: require(raw.nh3, "NH3")?,
        })
    }
}

impl PollutantReading {
    /// Every concentration multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        // ---
        PollutantReading {
            co: self.co * factor,
            no: self.no * factor,
            no2: self.no2 * factor,
            o3: self.o3 * factor,
            so2: self.so2 * factor,
            pm2_5: self.pm2_5 * factor,
            pm10: self.pm10 * factor,
            nh3: self.nh3 * factor,
        }
    }
}

/// Pollutants that can be reported as the main pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MainPollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
}

impl MainPollutant {
    /// Display name, e.g. `"PM2.5"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::O3 => "O3",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
        }
    }

    fn concentration(self, reading: &PollutantReading) -> f64 {
        match self {
            Self::Pm25 => reading.pm2_5,
            Self::Pm10 => reading.pm10,
            Self::O3 => reading.o3,
            Self::No2 => reading.no2,
            Self::So2 => reading.so2,
            Self::Co => reading.co,
        }
    }
}

impl std::fmt::Display for MainPollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalization constant a pollutant's concentration is divided by before
/// candidates are compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceThreshold {
    pub pollutant: MainPollutant,
    pub threshold: f64,
}

/// Default thresholds, in scan order. Earlier entries win ties.
pub const REFERENCE_THRESHOLDS: [ReferenceThreshold; 6] = [
    ReferenceThreshold { pollutant: MainPollutant::Pm25, threshold: 35.0 },
    ReferenceThreshold { pollutant: MainPollutant::Pm10, threshold: 150.0 },
    ReferenceThreshold { pollutant: MainPollutant::O3, threshold: 120.0 },
    ReferenceThreshold { pollutant: MainPollutant::No2, threshold: 100.0 },
    ReferenceThreshold { pollutant: MainPollutant::So2, threshold: 80.0 },
    ReferenceThreshold { pollutant: MainPollutant::Co, threshold: 10.0 },
];

/// Pick the pollutant with the highest concentration-to-threshold ratio
/// using [`REFERENCE_THRESHOLDS`].
pub fn main_pollutant(reading: &PollutantReading) -> Result<MainPollutant, AqiError> {
    main_pollutant_with(reading, &REFERENCE_THRESHOLDS)
}

/// Pick the pollutant with the highest concentration-to-threshold ratio.
///
/// Candidates are scanned in table order and only a strictly greater ratio
/// replaces the current best, so ties go to the earliest entry. An empty
/// table has no candidate and yields [`AqiError::MissingPollutant`].
pub fn main_pollutant_with(
    reading: &PollutantReading,
    thresholds: &[ReferenceThreshold],
) -> Result<MainPollutant, AqiError> {
    // ---
    let mut best: Option<(MainPollutant, f64)> = None;

    for entry in thresholds {
        let value = entry.pollutant.concentration(reading);
        if !value.is_finite() || value < 0.0 {
            return Err(AqiError::InvalidConcentration {
                pollutant: entry.pollutant.name(),
                value,
            });
        }

        let ratio = value / entry.threshold;
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((entry.pollutant, ratio)),
        }
    }

    best.map(|(pollutant, _)| pollutant)
        .ok_or(AqiError::MissingPollutant("any candidate"))
}
