//! Type system for Meteo
//!
//! This module contains the domain types shared by every crate:
//! - Value types
//! - Features and observations
//! - Bin tables, discrete keys and decision tables

pub mod bins;
pub mod feature;
pub mod key;
pub mod observation;
pub mod table;
pub mod value;

pub use bins::{bin_index, Bin, BinPolicy, BinTable, BoundRepr, MAX_BINS_PER_FEATURE};
pub use feature::Feature;
pub use key::DiscreteKey;
pub use observation::{Observation, WindVector};
pub use table::DecisionTable;
pub use value::Value;
