//! SPK segments and Chebyshev evaluation.
//!
//! Types 2 (position only) and 3 (position and velocity) store fixed-length
//! records of Chebyshev coefficients, followed by a four-word trailer
//! `INIT, INTLEN, RSIZE, N`. Each record is `MID, RADIUS` and then the
//! coefficients for x, y, z (and vx, vy, vz for type 3).

use glam::DVec3;
use wide::f64x4;

use super::daf::{Daf, DafError, Summary};
use super::naif::Target;
use crate::types::Instant;

/// Number of integers in an SPK segment summary.
pub const SPK_NI: usize = 6;
/// Number of doubles in an SPK segment summary.
pub const SPK_ND: usize = 2;

#[derive(thiserror::Error, Debug)]
pub enum SpkError {
    #[error(transparent)]
    Daf(#[from] DafError),

    #[error("not an SPK file (ND={nd}, NI={ni})")]
    NotSpk { nd: usize, ni: usize },

    #[error("segment for {target} uses unsupported SPK data type {data_type}")]
    UnsupportedSegmentType { target: Target, data_type: i32 },

    #[error("malformed segment for {target}: {reason}")]
    MalformedSegment { target: Target, reason: String },

    #[error("requested time {time} outside segment range [{start}, {end}] for {target}")]
    OutOfRange {
        target: Target,
        time: f64,
        start: f64,
        end: f64,
    },
}

/// Fixed-length Chebyshev records (SPK types 2 and 3).
#[derive(Clone, Debug)]
pub struct ChebyshevRecords {
    init: f64,
    interval: f64,
    record_size: usize,
    coefficient_count: usize,
    count: usize,
    words: Vec<f64>,
}

impl ChebyshevRecords {
    fn parse(target: Target, data_type: i32, mut words: Vec<f64>) -> Result<Self, SpkError> {
        let malformed = |reason: &str| SpkError::MalformedSegment {
            target,
            reason: reason.to_string(),
        };

        if words.len() < 4 {
            return Err(malformed("segment shorter than its trailer"));
        }
        let trailer = words.split_off(words.len() - 4);
        let (init, interval, rsize, n) = (trailer[0], trailer[1], trailer[2], trailer[3]);

        if !(interval > 0.0 && interval.is_finite()) {
            return Err(malformed("non-positive record interval"));
        }
        if n < 1.0 {
            return Err(malformed("empty record table"));
        }
        // Both must count words that are actually present
        let limit = words.len() as f64;
        if !(0.0..=limit).contains(&rsize) || rsize.fract() != 0.0 || n > limit || n.fract() != 0.0 {
            return Err(malformed("record table length disagrees with trailer"));
        }

        let record_size = rsize as usize;
        let count = n as usize;
        let components = if data_type == 3 { 6 } else { 3 };
        if record_size < 2 + components || (record_size - 2) % components != 0 {
            return Err(malformed("record size does not fit the coefficient layout"));
        }
        if record_size.checked_mul(count) != Some(words.len()) {
            return Err(malformed("record table length disagrees with trailer"));
        }
        if words
            .chunks_exact(record_size)
            .any(|record| !(record[1] > 0.0 && record[1].is_finite()))
        {
            return Err(malformed("record radius is not a positive finite number"));
        }

        Ok(Self {
            init,
            interval,
            record_size,
            coefficient_count: (record_size - 2) / components,
            count,
            words,
        })
    }

    /// Record index covering `t`, clamped to the table.
    fn record_index(&self, t: f64) -> usize {
        let i = ((t - self.init) / self.interval).floor();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(self.count - 1)
        }
    }

    /// Evaluate the position polynomial at `t` (TDB seconds past J2000).
    pub fn position(&self, t: f64) -> DVec3 {
        let start = self.record_index(t) * self.record_size;
        let record = &self.words[start..start + self.record_size];
        let (mid, radius) = (record[0], record[1]);
        let n = self.coefficient_count;

        let coefficients = &record[2..];
        chebyshev3(
            (t - mid) / radius,
            &coefficients[0..n],
            &coefficients[n..2 * n],
            &coefficients[2 * n..3 * n],
        )
    }
}

/// Evaluate three Chebyshev series at `s` in [-1, 1] with Clenshaw's recurrence.
///
/// The x, y and z series share the recurrence, so they run in SIMD lanes
/// (fourth lane unused). All three series must have the same length; extra
/// trailing coefficients on a longer slice are ignored.
pub fn chebyshev3(s: f64, x: &[f64], y: &[f64], z: &[f64]) -> DVec3 {
    let n = x.len().min(y.len()).min(z.len());
    if n == 0 {
        return DVec3::ZERO;
    }

    let two_s = f64x4::splat(2.0 * s);
    let mut b1 = f64x4::splat(0.0);
    let mut b2 = f64x4::splat(0.0);

    for k in (1..n).rev() {
        let c = f64x4::new([x[k], y[k], z[k], 0.0]);
        let b0 = c + two_s * b1 - b2;
        b2 = b1;
        b1 = b0;
    }

    let c0 = f64x4::new([x[0], y[0], z[0], 0.0]);
    let r = (c0 + f64x4::splat(s) * b1 - b2).to_array();
    DVec3::new(r[0], r[1], r[2])
}

#[derive(Clone, Debug)]
enum SegmentData {
    Chebyshev(ChebyshevRecords),
    Unsupported,
}

/// One SPK segment: the state of `target` relative to `center` over a time span.
#[derive(Clone, Debug)]
pub struct SpkSegment {
    pub name: String,
    pub target: Target,
    pub center: Target,
    pub frame: i32,
    pub data_type: i32,
    pub start: f64,
    pub end: f64,
    data: SegmentData,
}

impl SpkSegment {
    /// Decode a segment from its DAF summary, reading its data words.
    pub fn from_summary(daf: &Daf, summary: &Summary) -> Result<Self, SpkError> {
        if summary.doubles.len() < SPK_ND || summary.ints.len() < SPK_NI {
            return Err(SpkError::NotSpk {
                nd: summary.doubles.len(),
                ni: summary.ints.len(),
            });
        }

        let target = Target(summary.ints[0]);
        let data_type = summary.ints[3];
        let data = match data_type {
            2 | 3 => {
                let start_addr = summary.ints[4].max(0) as usize;
                let end_addr = summary.ints[5].max(0) as usize;
                let words = daf.read_words(start_addr, end_addr)?;
                SegmentData::Chebyshev(ChebyshevRecords::parse(target, data_type, words)?)
            }
            _ => SegmentData::Unsupported,
        };

        Ok(Self {
            name: summary.name.clone(),
            target,
            center: Target(summary.ints[1]),
            frame: summary.ints[2],
            data_type,
            start: summary.doubles[0],
            end: summary.doubles[1],
            data,
        })
    }

    pub fn covers(&self, at: Instant) -> bool {
        at.seconds() >= self.start && at.seconds() <= self.end
    }

    pub fn is_supported(&self) -> bool {
        matches!(self.data, SegmentData::Chebyshev(_))
    }

    /// Position of `target` relative to `center`, in kilometres.
    pub fn position(&self, at: Instant) -> Result<DVec3, SpkError> {
        let t = at.seconds();
        if !self.covers(at) {
            return Err(SpkError::OutOfRange {
                target: self.target,
                time: t,
                start: self.start,
                end: self.end,
            });
        }

        match &self.data {
            SegmentData::Chebyshev(records) => Ok(records.position(t)),
            SegmentData::Unsupported => Err(SpkError::UnsupportedSegmentType {
                target: self.target,
                data_type: self.data_type,
            }),
        }
    }
}
