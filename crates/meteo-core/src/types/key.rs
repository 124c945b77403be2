//! Discrete keys: one digit per feature bin index

use super::bins::MAX_BINS_PER_FEATURE;
use serde::{Deserialize, Serialize};
use std::fmt;

const RADIX: u32 = MAX_BINS_PER_FEATURE as u32;

/// Lookup key of a decision table cell.
///
/// Each position is a single base-36 digit, so for features with at most
/// ten bins the key reads as plain decimal digits (`"0101"`). Keys taken
/// from a configured mapping are stored verbatim, even when they could
/// never be produced by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscreteKey(String);

impl DiscreteKey {
    /// Wrap a key string as found in a mapping
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Encode bin indices. Returns `None` if an index has no single digit.
    pub fn from_indices(indices: &[usize]) -> Option<Self> {
        let mut key = String::with_capacity(indices.len());
        for &index in indices {
            let digit = u32::try_from(index).ok()?;
            key.push(char::from_digit(digit, RADIX)?);
        }
        Some(Self(key))
    }

    /// Decode the bin indices, if every character is a digit
    pub fn indices(&self) -> Option<Vec<usize>> {
        self.0
            .chars()
            .map(|c| c.to_digit(RADIX).map(|d| d as usize))
            .collect()
    }

    /// Sum of the decoded indices
    pub fn digit_sum(&self) -> Option<usize> {
        self.indices().map(|idx| idx.iter().sum())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiscreteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DiscreteKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_indices() {
        let key = DiscreteKey::from_indices(&[0, 1, 0, 1]).unwrap();
        assert_eq!(key.as_str(), "0101");
        assert_eq!(key.digit_sum(), Some(2));
    }

    #[test]
    fn test_key_wide_bins_use_letters() {
        let key = DiscreteKey::from_indices(&[10, 35, 0, 2]).unwrap();
        assert_eq!(key.as_str(), "az02");
        assert_eq!(key.indices(), Some(vec![10, 35, 0, 2]));
        assert!(DiscreteKey::from_indices(&[36]).is_none());
    }

    #[test]
    fn test_key_malformed_has_no_indices() {
        let key = DiscreteKey::new("01-1");
        assert_eq!(key.indices(), None);
        assert_eq!(key.len(), 4);
    }
}
