//! Run parameters. All of them are fixed for the shipped binary.

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::bodies::{Body, default_bodies};
use crate::ephemeris::Center;

/// SPK kernel read from the working directory.
pub const EPHEMERIS_PATH: &str = "de432s.bsp";

/// JSON document written to the working directory.
pub const OUTPUT_PATH: &str = "trajectories.json";

/// First grid timestamp (00:00 UTC).
pub const START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(d) => d,
    None => panic!("invalid start date"),
};

/// Grid end (00:00 UTC, exclusive).
pub const END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 12, 31) {
    Some(d) => d,
    None => panic!("invalid end date"),
};

#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub ephemeris_path: PathBuf,
    pub output_path: PathBuf,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bodies: Vec<Body>,
    pub center: Center,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ephemeris_path: PathBuf::from(EPHEMERIS_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
            start: START_DATE,
            end: END_DATE,
            bodies: default_bodies(),
            center: Center::Barycentric,
        }
    }
}
