//! Core types and constants shared across the pipeline.

use glam::DVec3;

/// Position of a body in kilometres.
pub type Position = DVec3;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days per Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00:00 TT/TDB)
pub const J2000_JD: f64 = 2451545.0;

/// TT - TAI, fixed by definition (seconds)
pub const TT_MINUS_TAI: f64 = 32.184;

/// An instant on the TDB scale, in seconds past J2000.
///
/// This is the native time argument of SPK kernels ("ephemeris time").
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Instant(pub f64);

impl Instant {
    /// J2000.0 itself.
    pub const J2000: Instant = Instant(0.0);

    /// Seconds past J2000 (TDB).
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Julian date on the TDB scale.
    pub fn julian_date(self) -> f64 {
        J2000_JD + self.0 / SECONDS_PER_DAY
    }
}

/// Convert a position to the `[x, y, z]` triple written to JSON.
pub fn to_triple(p: Position) -> [f64; 3] {
    p.to_array()
}
