//! Bin tables
//!
//! Each feature owns an ordered list of half-open ranges `[lo, hi)`. A
//! reading is classified by the first range that contains it, with two
//! deliberate fallbacks: a missing reading lands in the middle bin and a
//! reading no range matches is clamped to the last bin.

use super::feature::Feature;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest bin count a feature may have (one base-36 digit per key position)
pub const MAX_BINS_PER_FEATURE: usize = 36;

/// Index used for a missing reading
pub const MISSING_BIN_INDEX: usize = 1;

/// A half-open interval `[lo, hi)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
}

impl Bin {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Lower-inclusive, upper-exclusive membership
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value < self.hi
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

/// How strictly bin configurations are checked when a table is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinPolicy {
    /// Reject empty, inverted, gapped or overlapping ranges
    #[default]
    Strict,
    /// Accept anything encodable and clamp at lookup time
    Lenient,
}

impl std::str::FromStr for BinPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(BinPolicy::Strict),
            "lenient" => Ok(BinPolicy::Lenient),
            other => Err(CoreError::InvalidValue(format!(
                "unknown bin policy '{}'",
                other
            ))),
        }
    }
}

/// Map a reading to its bin index.
///
/// `None` yields the middle bin, a reading no range contains (below the
/// first lower bound, NaN, malformed bounds) yields the last bin.
pub fn bin_index(value: Option<f64>, bounds: &[Bin]) -> usize {
    let last = bounds.len().saturating_sub(1);
    let Some(value) = value else {
        return MISSING_BIN_INDEX.min(last);
    };

    bounds
        .iter()
        .position(|bin| bin.contains(value))
        .unwrap_or(last)
}

/// Ordered bins for all four features
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    /// Bins indexed by `Feature::position`
    bins: [Vec<Bin>; Feature::COUNT],
}

impl Default for BinTable {
    fn default() -> Self {
        let inf = f64::INFINITY;
        Self {
            bins: [
                vec![Bin::new(0.0, 3.0), Bin::new(3.0, 8.0), Bin::new(8.0, inf)],
                vec![Bin::new(-50.0, 5.0), Bin::new(5.0, 25.0), Bin::new(25.0, inf)],
                vec![Bin::new(0.0, 0.1), Bin::new(0.1, 5.0), Bin::new(5.0, inf)],
                vec![Bin::new(0.0, 30.0), Bin::new(30.0, 60.0), Bin::new(60.0, inf)],
            ],
        }
    }
}

impl BinTable {
    /// Build a table from per-feature bins, checked against `policy`.
    ///
    /// Every feature must appear exactly once.
    pub fn from_entries<I>(entries: I, policy: BinPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (Feature, Vec<Bin>)>,
    {
        let mut slots: [Option<Vec<Bin>>; Feature::COUNT] = Default::default();

        for (feature, bins) in entries {
            let slot = &mut slots[feature.position()];
            if slot.is_some() {
                return Err(CoreError::InvalidBins {
                    feature: feature.name().to_string(),
                    message: "feature listed more than once".to_string(),
                });
            }
            *slot = Some(bins);
        }

        let mut out: [Vec<Bin>; Feature::COUNT] = Default::default();
        for feature in Feature::ALL {
            out[feature.position()] = slots[feature.position()]
                .take()
                .ok_or_else(|| CoreError::MissingFeature(feature.name().to_string()))?;
        }

        let table = Self { bins: out };
        table.validate(policy)?;
        Ok(table)
    }

    /// Ranges for one feature
    pub fn bounds(&self, feature: Feature) -> &[Bin] {
        &self.bins[feature.position()]
    }

    /// Bin index of a reading for `feature`
    pub fn index_of(&self, feature: Feature, value: Option<f64>) -> usize {
        bin_index(value, self.bounds(feature))
    }

    /// Bin counts in encoding order
    pub fn cardinalities(&self) -> [usize; Feature::COUNT] {
        [
            self.bins[0].len(),
            self.bins[1].len(),
            self.bins[2].len(),
            self.bins[3].len(),
        ]
    }

    /// Number of distinct keys the table can produce
    pub fn key_space_size(&self) -> usize {
        self.cardinalities().iter().product()
    }

    /// Iterate `(feature, bins)` in encoding order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &[Bin])> {
        Feature::ALL
            .iter()
            .map(move |f| (*f, self.bins[f.position()].as_slice()))
    }

    /// Check the table against a policy.
    ///
    /// Both policies require 1..=36 bins per feature so every index fits in
    /// one key digit. `Strict` additionally requires non-NaN bounds with
    /// `lo < hi` and each range starting where the previous one ended.
    pub fn validate(&self, policy: BinPolicy) -> Result<()> {
        for (feature, bins) in self.iter() {
            let invalid = |message: String| CoreError::InvalidBins {
                feature: feature.name().to_string(),
                message,
            };

            if bins.is_empty() {
                return Err(invalid("no ranges given".to_string()));
            }
            if bins.len() > MAX_BINS_PER_FEATURE {
                return Err(invalid(format!(
                    "{} ranges exceed the limit of {}",
                    bins.len(),
                    MAX_BINS_PER_FEATURE
                )));
            }

            if let Some(problem) = Self::irregularity(bins) {
                match policy {
                    BinPolicy::Strict => return Err(invalid(problem)),
                    BinPolicy::Lenient => {
                        log::warn!("Accepting irregular bins for {}: {}", feature, problem)
                    }
                }
            }
        }

        Ok(())
    }
}

impl BinTable {
    /// First structural problem of a feature's ranges, if any
    fn irregularity(bins: &[Bin]) -> Option<String> {
        for (i, bin) in bins.iter().enumerate() {
            if bin.lo.is_nan() || bin.hi.is_nan() {
                return Some(format!("range {} has a NaN bound", i));
            }
            if bin.lo >= bin.hi {
                return Some(format!("range {} {} is empty or inverted", i, bin));
            }
        }
        for (i, pair) in bins.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if next.lo > prev.hi {
                return Some(format!(
                    "gap between range {} {} and range {} {}",
                    i,
                    prev,
                    i + 1,
                    next
                ));
            }
            if next.lo < prev.hi {
                return Some(format!(
                    "range {} {} overlaps range {} {}",
                    i + 1,
                    next,
                    i,
                    prev
                ));
            }
        }
        None
    }
}

/// A bound as written in a configuration document: a number or a textual
/// sentinel such as `"inf"` / `"-inf"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundRepr {
    Number(f64),
    Text(String),
}

impl BoundRepr {
    /// Encode a bound, writing infinities as textual sentinels
    pub fn from_f64(value: f64) -> Self {
        if value == f64::INFINITY {
            BoundRepr::Text("inf".to_string())
        } else if value == f64::NEG_INFINITY {
            BoundRepr::Text("-inf".to_string())
        } else {
            BoundRepr::Number(value)
        }
    }

    /// Coerce to a float: infinity sentinels become infinities, other text
    /// must parse as a number. NaN is never a bound.
    pub fn to_f64(&self) -> Result<f64> {
        let value = match self {
            BoundRepr::Number(n) => *n,
            BoundRepr::Text(text) => {
                let trimmed = text.trim();
                match trimmed.to_ascii_lowercase().as_str() {
                    "inf" | "+inf" | "infinity" | "+infinity" => f64::INFINITY,
                    "-inf" | "-infinity" => f64::NEG_INFINITY,
                    _ => trimmed
                        .parse::<f64>()
                        .map_err(|_| CoreError::InvalidBound(text.clone()))?,
                }
            }
        };
        if value.is_nan() {
            return Err(CoreError::InvalidBound(self.to_string()));
        }
        Ok(value)
    }
}

impl fmt::Display for BoundRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundRepr::Number(n) => write!(f, "{}", n),
            BoundRepr::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bins_are_strictly_valid() {
        let table = BinTable::default();
        assert!(table.validate(BinPolicy::Strict).is_ok());
        assert_eq!(table.cardinalities(), [3, 3, 3, 3]);
        assert_eq!(table.key_space_size(), 81);
    }

    #[test]
    fn test_bin_index_lower_bound_is_inclusive() {
        let table = BinTable::default();
        assert_eq!(table.index_of(Feature::WindSpeed, Some(2.999)), 0);
        assert_eq!(table.index_of(Feature::WindSpeed, Some(3.0)), 1);
        assert_eq!(table.index_of(Feature::WindSpeed, Some(8.0)), 2);
        assert_eq!(table.index_of(Feature::Temperature, Some(5.0)), 1);
        assert_eq!(table.index_of(Feature::Temperature, Some(25.0)), 2);
        assert_eq!(table.index_of(Feature::Precipitation, Some(0.1)), 1);
        assert_eq!(table.index_of(Feature::Precipitation, Some(5.0)), 2);
        assert_eq!(table.index_of(Feature::Humidity, Some(30.0)), 1);
        assert_eq!(table.index_of(Feature::Humidity, Some(60.0)), 2);
    }

    #[test]
    fn test_bin_index_missing_is_middle() {
        let table = BinTable::default();
        for feature in Feature::ALL {
            assert_eq!(table.index_of(feature, None), 1);
        }
    }

    #[test]
    fn test_bin_index_clamps_to_last() {
        let table = BinTable::default();
        assert_eq!(table.index_of(Feature::WindSpeed, Some(-1.0)), 2);
        assert_eq!(table.index_of(Feature::Temperature, Some(-80.0)), 2);
        assert_eq!(table.index_of(Feature::Humidity, Some(f64::NAN)), 2);
        assert_eq!(table.index_of(Feature::WindSpeed, Some(f64::INFINITY)), 2);
    }

    #[test]
    fn test_bin_index_single_bin_missing_stays_valid() {
        let bounds = [Bin::new(f64::NEG_INFINITY, f64::INFINITY)];
        assert_eq!(bin_index(None, &bounds), 0);
        assert_eq!(bin_index(Some(12.0), &bounds), 0);
    }

    #[test]
    fn test_strict_rejects_gap_and_overlap() {
        let mut entries: Vec<(Feature, Vec<Bin>)> = BinTable::default()
            .iter()
            .map(|(f, b)| (f, b.to_vec()))
            .collect();
        entries[0].1 = vec![Bin::new(0.0, 3.0), Bin::new(4.0, f64::INFINITY)];
        let err = BinTable::from_entries(entries.clone(), BinPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("gap"));

        entries[0].1 = vec![Bin::new(0.0, 5.0), Bin::new(4.0, f64::INFINITY)];
        let err = BinTable::from_entries(entries.clone(), BinPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("overlaps"));

        assert!(BinTable::from_entries(entries, BinPolicy::Lenient).is_ok());
    }

    #[test]
    fn test_strict_rejects_inverted_range() {
        let mut entries: Vec<(Feature, Vec<Bin>)> = BinTable::default()
            .iter()
            .map(|(f, b)| (f, b.to_vec()))
            .collect();
        entries[3].1 = vec![Bin::new(10.0, 0.0)];
        assert!(BinTable::from_entries(entries, BinPolicy::Strict).is_err());
    }

    #[test]
    fn test_from_entries_requires_every_feature() {
        let entries = vec![(Feature::WindSpeed, vec![Bin::new(0.0, 1.0)])];
        let err = BinTable::from_entries(entries, BinPolicy::Lenient).unwrap_err();
        assert!(matches!(err, CoreError::MissingFeature(_)));
    }

    #[test]
    fn test_bound_repr_coercion() {
        assert_eq!(BoundRepr::Text("inf".into()).to_f64().unwrap(), f64::INFINITY);
        assert_eq!(
            BoundRepr::Text("-INF".into()).to_f64().unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(BoundRepr::Text("0.1".into()).to_f64().unwrap(), 0.1);
        assert_eq!(BoundRepr::Number(3.0).to_f64().unwrap(), 3.0);
        assert!(BoundRepr::Text("lots".into()).to_f64().is_err());

        for nan in [
            BoundRepr::Text("nan".into()),
            BoundRepr::Text(" NaN ".into()),
            BoundRepr::Number(f64::NAN),
        ] {
            assert!(matches!(nan.to_f64(), Err(CoreError::InvalidBound(_))), "{:?}", nan);
        }

        assert_eq!(
            BoundRepr::from_f64(f64::NEG_INFINITY),
            BoundRepr::Text("-inf".into())
        );
        assert_eq!(BoundRepr::from_f64(5.0), BoundRepr::Number(5.0));
    }
}
