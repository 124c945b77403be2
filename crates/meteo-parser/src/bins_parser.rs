//! Bins parser
//!
//! Converts the `bins` section of a document into a validated `BinTable`.

use crate::error::{ParseError, Result};
use meteo_core::ast::{BinsSpec, BoundPair};
use meteo_core::types::{Bin, BinPolicy, BinTable, Feature};

/// Bins parser
pub struct BinsParser;

impl BinsParser {
    /// Coerce a bins section into a bin table.
    ///
    /// A missing section yields the built-in default bins. A present section
    /// must name all four features; bounds are checked against `policy`.
    pub fn parse(spec: Option<&BinsSpec>, policy: BinPolicy) -> Result<BinTable> {
        let Some(spec) = spec else {
            return Ok(BinTable::default());
        };

        let mut entries = Vec::with_capacity(spec.entries.len());
        for (name, pairs) in &spec.entries {
            let feature: Feature = name.parse()?;
            let bins = pairs
                .iter()
                .map(|pair| Self::parse_pair(feature, pair))
                .collect::<Result<Vec<_>>>()?;
            entries.push((feature, bins));
        }

        let table = BinTable::from_entries(entries, policy)?;
        log::debug!("Parsed bins with cardinalities {:?}", table.cardinalities());
        Ok(table)
    }

    fn parse_pair(feature: Feature, pair: &BoundPair) -> Result<Bin> {
        let lo = pair[0].to_f64().map_err(|e| Self::bound_error(feature, e))?;
        let hi = pair[1].to_f64().map_err(|e| Self::bound_error(feature, e))?;
        Ok(Bin::new(lo, hi))
    }

    fn bound_error(feature: Feature, err: meteo_core::CoreError) -> ParseError {
        ParseError::InvalidValue {
            field: format!("bins.{}", feature.name()),
            message: err.to_string(),
        }
    }
}
