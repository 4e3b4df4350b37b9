//! Civil time to ephemeris time conversion and the hourly time grid.
//!
//! Grid endpoints are civil (UTC) calendar dates. SPK lookups need TDB seconds
//! past J2000, so every grid point goes UTC -> TAI (leap-second table) -> TT
//! (+32.184 s) -> TDB (periodic series).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::types::{
    DAYS_PER_JULIAN_CENTURY, Instant, J2000_JD, SECONDS_PER_DAY, SECONDS_PER_HOUR, TT_MINUS_TAI,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("invalid time range: end {end} precedes start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("{0} predates the leap-second table (1972-01-01 UTC)")]
    BeforeLeapSecondTable(NaiveDateTime),

    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// TAI - UTC in seconds, effective from the given UTC date onward.
const LEAP_SECONDS: &[(i32, u32, f64)] = &[
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// Build a UTC midnight timestamp from calendar fields.
pub fn civil_date(year: i32, month: u32, day: u32) -> Result<NaiveDateTime, TimeError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or(TimeError::InvalidDate { year, month, day })
}

/// TAI - UTC at the given UTC timestamp.
pub fn tai_minus_utc(utc: NaiveDateTime) -> Result<f64, TimeError> {
    let date = utc.date();
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|&&(y, m, _)| {
            NaiveDate::from_ymd_opt(y, m, 1).is_some_and(|effective| effective <= date)
        })
        .map(|&(_, _, dat)| dat)
        .ok_or(TimeError::BeforeLeapSecondTable(utc))
}

/// UTC label of the J2000.0 epoch as a naive calendar point (2000-01-01 12:00).
fn j2000_label() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

fn delta_seconds(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}

/// Seconds past J2000 on the TT scale.
///
/// TT has no leap seconds, so the naive calendar difference plus the total
/// UTC offset is exact.
pub fn utc_to_tt_seconds(utc: NaiveDateTime) -> Result<f64, TimeError> {
    let dat = tai_minus_utc(utc)?;
    Ok(delta_seconds(utc - j2000_label()) + dat + TT_MINUS_TAI)
}

/// TDB - TT in seconds for a TT Julian date.
///
/// Fairhead & Bretagnon series truncated to the terms above 1 microsecond.
pub fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    0.001657 * (628.3076 * t + 6.2401).sin()
        + 0.000022 * (575.3385 * t + 4.2970).sin()
        + 0.000014 * (1256.6152 * t + 6.1969).sin()
        + 0.000005 * (606.9777 * t + 4.0212).sin()
        + 0.000005 * (52.9691 * t + 0.4444).sin()
        + 0.000002 * (21.3299 * t + 5.5431).sin()
        + 0.000010 * t * (628.3076 * t + 4.2490).sin()
}

/// Convert a civil UTC timestamp to an ephemeris instant (TDB seconds past J2000).
pub fn civil_to_instant(utc: NaiveDateTime) -> Result<Instant, TimeError> {
    let tt = utc_to_tt_seconds(utc)?;
    let jd_tt = J2000_JD + tt / SECONDS_PER_DAY;
    Ok(Instant(tt + tdb_minus_tt(jd_tt)))
}

/// Whole hours elapsed from `start` to `end` on the TT scale, truncated toward zero.
///
/// Negative when `end` precedes `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, TimeError> {
    let elapsed = utc_to_tt_seconds(end)? - utc_to_tt_seconds(start)?;
    Ok((elapsed / SECONDS_PER_HOUR) as i64)
}

/// Ordered sequence of hourly timestamps.
///
/// Each point keeps its UTC label next to the TDB instant used for lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeGrid {
    utc: Vec<NaiveDateTime>,
    instants: Vec<Instant>,
}

impl TimeGrid {
    /// One timestamp per hour from `start` (00:00 UTC) up to, but excluding, `end`.
    pub fn hourly(start: NaiveDate, end: NaiveDate) -> Result<Self, TimeError> {
        Self::hourly_between(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// One timestamp per hour beginning at `start`; the count is the truncated
    /// number of hours to `end`.
    pub fn hourly_between(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeError> {
        if end < start {
            return Err(TimeError::InvalidRange { start, end });
        }

        let hours = hours_between(start, end)?.max(0);
        let mut utc = Vec::with_capacity(hours as usize);
        let mut instants = Vec::with_capacity(hours as usize);
        for h in 0..hours {
            let label = start + TimeDelta::hours(h);
            instants.push(civil_to_instant(label)?);
            utc.push(label);
        }

        Ok(Self { utc, instants })
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// TDB instants in grid order.
    pub fn instants(&self) -> &[Instant] {
        &self.instants
    }

    /// UTC labels in grid order.
    pub fn utc(&self) -> &[NaiveDateTime] {
        &self.utc
    }

    pub fn first(&self) -> Option<Instant> {
        self.instants.first().copied()
    }
}
