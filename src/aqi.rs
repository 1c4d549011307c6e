//! EPA Air Quality Index conversion for PM2.5.
//!
//! Maps a fine particulate concentration (μg/m³) onto the 0–500 AQI scale
//! using the EPA piecewise-linear breakpoint table, and classifies the
//! resulting index into one of six health severity levels.

use serde::Serialize;
use thiserror::Error;

// ---

/// Highest index on the AQI scale; concentrations above the table clamp here.
pub const AQI_MAX: u16 = 500;

/// Errors raised by the AQI core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    // ---
    /// Concentration was negative, NaN or infinite.
    #[error("invalid {pollutant} concentration: {value}")]
    InvalidConcentration { pollutant: &'static str, value: f64 },

    /// A reading lacked a pollutant the calculation needs.
    #[error("reading is missing pollutant {0}")]
    MissingPollutant(&'static str),
}

/// One linear segment of the EPA concentration-to-index table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    // ---
    pub aqi_low: u16,
    pub aqi_high: u16,
    pub conc_low: f64,
    pub conc_high: f64,
}

impl Breakpoint {
    const fn new(aqi_low: u16, aqi_high: u16, conc_low: f64, conc_high: f64) -> Self {
        Self {
            aqi_low,
            aqi_high,
            conc_low,
            conc_high,
        }
    }

    /// Linear interpolation within this segment, rounded half away from zero.
    fn interpolate(&self, pm25: f64) -> u16 {
        // ---
        let aqi_span = f64::from(self.aqi_high - self.aqi_low);
        let conc_span = self.conc_high - self.conc_low;
        let aqi = aqi_span / conc_span * (pm25 - self.conc_low) + f64::from(self.aqi_low);

        aqi.round() as u16
    }
}

/// PM2.5 breakpoints (μg/m³), ordered by concentration.
///
/// A segment owns every concentration above the previous segment's upper
/// bound up to and including its own, so values falling between `9.0` and
/// `9.1` belong to the second row.
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(0, 50, 0.0, 9.0),
    Breakpoint::new(51, 100, 9.1, 35.4),
    Breakpoint::new(101, 150, 35.5, 55.4),
    Breakpoint::new(151, 200, 55.5, 125.4),
    Breakpoint::new(201, 300, 125.5, 225.4),
    Breakpoint::new(301, 500, 225.5, 325.4),
];

/// Convert a PM2.5 concentration into an EPA AQI value in `0..=500`.
///
/// Concentrations above the last breakpoint clamp to [`AQI_MAX`].
/// Negative and non-finite input is rejected instead of being mapped to a
/// valid-looking index.
pub fn pm25_to_aqi(pm25: f64) -> Result<u16, AqiError> {
    // ---
    if !pm25.is_finite() || pm25 < 0.0 {
        return Err(AqiError::InvalidConcentration {
            pollutant: "PM2.5",
            value: pm25,
        });
    }

    let segment = PM25_BREAKPOINTS.iter().find(|bp| pm25 <= bp.conc_high);

    Ok(match segment {
        Some(bp) => bp.interpolate(pm25),
        None => AQI_MAX,
    })
}

/// Health severity band for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Classify an AQI value. Anything above 300 is hazardous.
    pub fn from_aqi(aqi: u16) -> Self {
        // ---
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// EPA display color as a CSS `hsl()` string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "hsl(123, 50%, 50%)",
            Self::Moderate => "hsl(60, 100%, 50%)",
            Self::UnhealthyForSensitiveGroups => "hsl(39, 100%, 50%)",
            Self::Unhealthy => "hsl(4, 90%, 58%)",
            Self::VeryUnhealthy => "hsl(291, 64%, 50%)",
            Self::Hazardous => "hsl(0, 90%, 35%)",
        }
    }

    /// Foreground color readable on top of [`AqiLevel::color`].
    pub fn text_color(self) -> &'static str {
        match self {
            Self::Moderate => "black",
            _ => "white",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Good => "😊",
            Self::Moderate => "😐",
            Self::UnhealthyForSensitiveGroups => "😷",
            Self::Unhealthy => "😨",
            Self::VeryUnhealthy => "😰",
            Self::Hazardous => "💀",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        // ---
        match self {
            Self::Good => &[
                "Air quality is good - enjoy outdoor activities!",
                "Perfect time for exercise and outdoor recreation",
                "Windows can be opened for fresh air",
            ],
            Self::Moderate => &[
                "Air quality is acceptable for most people",
                "Sensitive individuals should consider limiting prolonged outdoor exertion",
                "Generally safe for outdoor activities",
            ],
            Self::UnhealthyForSensitiveGroups => &[
                "Sensitive groups should greatly reduce outdoor exercise",
                "Consider wearing a mask if you have respiratory issues",
                "Close windows to avoid letting outdoor air pollution indoors",
            ],
            Self::Unhealthy => &[
                "Everyone should avoid outdoor exertion",
                "Wear an air pollution mask outdoors",
                "Keep windows closed and use air purifiers",
                "Public at risk for eye, skin, and throat irritation",
            ],
            Self::VeryUnhealthy => &[
                "Everyone should avoid outdoor exercise",
                "Wear a pollution mask outdoors",
                "Stay indoors and limit activities",
                "Turn on air purifiers - ventilation discouraged",
            ],
            Self::Hazardous => &[
                "Avoid exercise and remain indoors",
                "Everyone at high risk of strong irritation",
                "Wear pollution mask if you must go outside",
                "May trigger cardiovascular and respiratory illnesses",
            ],
        }
    }
}

/// Display attributes of a level, as sent to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub label: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
    pub icon: &'static str,
}

impl From<AqiLevel> for LevelInfo {
    fn from(level: AqiLevel) -> Self {
        LevelInfo {
            label: level.label(),
            color: level.color(),
            text_color: level.text_color(),
            icon: level.icon(),
        }
    }
}
