//! Normalized weather observations

use super::feature::Feature;
use serde::{Deserialize, Deserializer, Serialize};

/// Wind reading with its direction metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    /// Wind speed in m/s
    #[serde(default)]
    pub speed_mps: Option<f64>,
    /// Direction in degrees; carried along, never used for decisions
    #[serde(default)]
    pub direction_deg: Option<f64>,
}

/// Snapshot of the four readings a decision is made on.
///
/// Every reading is optional; absent readings are handled by the key
/// encoder's missing-value policy rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_vector: WindVector,
    #[serde(default)]
    pub dry_bulb_temperature: Option<f64>,
    #[serde(default)]
    pub precipitation_mm: Option<f64>,
    #[serde(default)]
    pub relative_humidity_pct: Option<f64>,
}

impl Observation {
    /// Observation with all four readings present
    pub fn new(wind_mps: f64, temperature_c: f64, precipitation_mm: f64, humidity_pct: f64) -> Self {
        Self {
            wind_vector: WindVector {
                speed_mps: Some(wind_mps),
                direction_deg: None,
            },
            dry_bulb_temperature: Some(temperature_c),
            precipitation_mm: Some(precipitation_mm),
            relative_humidity_pct: Some(humidity_pct),
        }
    }

    pub fn with_wind_speed(mut self, speed_mps: Option<f64>) -> Self {
        self.wind_vector.speed_mps = speed_mps;
        self
    }

    pub fn with_wind_direction(mut self, direction_deg: Option<f64>) -> Self {
        self.wind_vector.direction_deg = direction_deg;
        self
    }

    pub fn with_temperature(mut self, temperature_c: Option<f64>) -> Self {
        self.dry_bulb_temperature = temperature_c;
        self
    }

    pub fn with_precipitation(mut self, precipitation_mm: Option<f64>) -> Self {
        self.precipitation_mm = precipitation_mm;
        self
    }

    pub fn with_humidity(mut self, humidity_pct: Option<f64>) -> Self {
        self.relative_humidity_pct = humidity_pct;
        self
    }

    /// Raw reading for a feature, exactly as observed
    pub fn reading(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::WindSpeed => self.wind_vector.speed_mps,
            Feature::Temperature => self.dry_bulb_temperature,
            Feature::Precipitation => self.precipitation_mm,
            Feature::Humidity => self.relative_humidity_pct,
        }
    }
}

/// Treat an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
