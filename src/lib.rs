//! Trajectories - hourly solar-system positions from a JPL ephemeris
//!
//! A library crate providing the time grid, SPK ephemeris reader, position
//! collector and JSON writer used by the `trajectories` binary.

pub mod bodies;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod time;
pub mod trajectory;
pub mod types;

pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;
