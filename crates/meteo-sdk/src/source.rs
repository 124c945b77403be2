//! Observation sources
//!
//! Where observations come from before they reach the engine: a weather
//! provider response on disk, or a record that is already normalized.

use crate::error::Result;
use meteo_core::types::Observation;
use std::path::Path;

/// JSON pointer to the current conditions block of a provider response
const CURRENT_CONDITIONS: &str = "/weather/interpreted_data/area_summary/current_conditions";

/// Produces a normalized observation
pub trait ObservationSource {
    fn observe(&self) -> Result<Observation>;
}

/// Weather provider response.
///
/// Any missing level of the response yields absent readings rather than an
/// error; the engine's missing-value policy handles them.
#[derive(Debug, Clone)]
pub struct WeatherResponseSource {
    response: serde_json::Value,
}

impl WeatherResponseSource {
    /// Read a response from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_content(&content)
    }

    /// Parse a response from JSON text
    pub fn from_content(content: &str) -> Result<Self> {
        Ok(Self {
            response: serde_json::from_str(content)?,
        })
    }

    fn reading(&self, field: &str) -> Option<f64> {
        self.response
            .pointer(CURRENT_CONDITIONS)
            .and_then(|conditions| conditions.get(field))
            .and_then(serde_json::Value::as_f64)
    }
}

impl ObservationSource for WeatherResponseSource {
    fn observe(&self) -> Result<Observation> {
        if self.response.pointer(CURRENT_CONDITIONS).is_none() {
            tracing::warn!("Weather response has no current conditions; all readings absent");
        }

        Ok(Observation::default()
            .with_wind_speed(self.reading("wind_speed_mps"))
            .with_wind_direction(self.reading("wind_direction_deg"))
            .with_temperature(self.reading("temperature_celsius"))
            .with_precipitation(self.reading("precipitation_mm"))
            .with_humidity(self.reading("humidity_percent")))
    }
}

/// An already-normalized observation
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSource {
    observation: Observation,
}

impl StaticSource {
    pub fn new(observation: Observation) -> Self {
        Self { observation }
    }

    /// Read a normalized observation record from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_content(&content)
    }

    /// Parse a normalized observation record
    pub fn from_content(content: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }
}

impl ObservationSource for StaticSource {
    fn observe(&self) -> Result<Observation> {
        Ok(self.observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "weather": {
            "interpreted_data": {
                "area_summary": {
                    "current_conditions": {
                        "wind_speed_mps": 10.0,
                        "wind_direction_deg": 270,
                        "temperature_celsius": 30.0,
                        "precipitation_mm": 6.0,
                        "humidity_percent": 70
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_weather_response_extracts_readings() {
        let obs = WeatherResponseSource::from_content(RESPONSE)
            .unwrap()
            .observe()
            .unwrap();
        assert_eq!(obs, Observation::new(10.0, 30.0, 6.0, 70.0).with_wind_direction(Some(270.0)));
    }

    #[test]
    fn test_missing_level_yields_absent_readings() {
        let obs = WeatherResponseSource::from_content(r#"{"weather": {"interpreted_data": {}}}"#)
            .unwrap()
            .observe()
            .unwrap();
        assert_eq!(obs, Observation::default());
    }

    #[test]
    fn test_partial_conditions() {
        let content = r#"{"weather": {"interpreted_data": {"area_summary": {"current_conditions": {"temperature_celsius": -3.5, "humidity_percent": null}}}}}"#;
        let obs = WeatherResponseSource::from_content(content)
            .unwrap()
            .observe()
            .unwrap();
        assert_eq!(obs.dry_bulb_temperature, Some(-3.5));
        assert_eq!(obs.relative_humidity_pct, None);
        assert_eq!(obs.wind_vector.speed_mps, None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(WeatherResponseSource::from_content("not json").is_err());
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::from_content(
            r#"{"wind_vector": {"speed_mps": 2.0}, "dry_bulb_temperature": 10.0, "relative_humidity_pct": 50.0}"#,
        )
        .unwrap();
        let obs = source.observe().unwrap();
        assert_eq!(obs.wind_vector.speed_mps, Some(2.0));
        assert_eq!(obs.precipitation_mm, None);
    }
}
