//! Key encoder
//!
//! Turns an observation into per-feature bin indices and the discrete key
//! they spell, in the fixed feature order.

use crate::error::{Result, RuntimeError};
use meteo_core::types::{BinTable, DiscreteKey, Feature, Observation};

/// Bin indices of an observation together with their key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedObservation {
    pub key: DiscreteKey,
    pub indices: [usize; Feature::COUNT],
}

impl EncodedObservation {
    /// Sum of the bin indices (`s` in rules)
    pub fn index_sum(&self) -> usize {
        self.indices.iter().sum()
    }
}

/// Key encoder
pub struct KeyEncoder<'a> {
    bins: &'a BinTable,
}

impl<'a> KeyEncoder<'a> {
    pub fn new(bins: &'a BinTable) -> Self {
        Self { bins }
    }

    /// Bin index per feature.
    ///
    /// Missing precipitation counts as 0.0 (no rain) before binning; the
    /// other features fall back to the middle bin when missing.
    pub fn indices(&self, observation: &Observation) -> [usize; Feature::COUNT] {
        let mut indices = [0; Feature::COUNT];
        for feature in Feature::ALL {
            let reading = match feature {
                Feature::Precipitation => Some(observation.reading(feature).unwrap_or(0.0)),
                _ => observation.reading(feature),
            };
            indices[feature.position()] = self.bins.index_of(feature, reading);
        }
        indices
    }

    /// Encode an observation into its key and indices
    pub fn encode(&self, observation: &Observation) -> Result<EncodedObservation> {
        let indices = self.indices(observation);
        let key = DiscreteKey::from_indices(&indices)
            .ok_or_else(|| RuntimeError::InvalidKey(indices.to_vec()))?;
        Ok(EncodedObservation { key, indices })
    }
}
