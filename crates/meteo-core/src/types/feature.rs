//! Weather features and their fixed encoding order

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four continuous quantities the engine classifies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Wind speed (m/s)
    #[serde(rename = "wind_speed_mps")]
    WindSpeed,
    /// Dry-bulb temperature (°C)
    #[serde(rename = "dry_bulb_temperature")]
    Temperature,
    /// Precipitation (mm)
    #[serde(rename = "precipitation_mm")]
    Precipitation,
    /// Relative humidity (%)
    #[serde(rename = "relative_humidity_pct")]
    Humidity,
}

impl Feature {
    /// Encoding order of a discrete key: wind, temperature, precipitation, humidity
    pub const ALL: [Feature; 4] = [
        Feature::WindSpeed,
        Feature::Temperature,
        Feature::Precipitation,
        Feature::Humidity,
    ];

    /// Number of features in a key
    pub const COUNT: usize = 4;

    /// Configuration name of the feature
    pub fn name(&self) -> &'static str {
        match self {
            Feature::WindSpeed => "wind_speed_mps",
            Feature::Temperature => "dry_bulb_temperature",
            Feature::Precipitation => "precipitation_mm",
            Feature::Humidity => "relative_humidity_pct",
        }
    }

    /// Position of the feature inside a discrete key
    pub fn position(&self) -> usize {
        match self {
            Feature::WindSpeed => 0,
            Feature::Temperature => 1,
            Feature::Precipitation => 2,
            Feature::Humidity => 3,
        }
    }

    /// Rule variable bound to this feature's bin index (`i1`..`i4`)
    pub fn index_variable(&self) -> &'static str {
        match self {
            Feature::WindSpeed => "i1",
            Feature::Temperature => "i2",
            Feature::Precipitation => "i3",
            Feature::Humidity => "i4",
        }
    }

    /// Feature names in encoding order
    pub fn order() -> Vec<String> {
        Self::ALL.iter().map(|f| f.name().to_string()).collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}
