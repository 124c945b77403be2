//! Meteo command-line library
//!
//! Subcommands and settings of the `meteo` binary, split out for testing.

pub mod commands;
pub mod config;
pub mod error;
