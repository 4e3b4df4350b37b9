//! Ephemeris module for computing celestial body positions.
//!
//! Positions come from a JPL SPK kernel (e.g. `de432s.bsp`) loaded into memory
//! once per run. Each segment gives a target relative to a center; a lookup
//! walks target -> center -> ... -> solar-system barycenter and sums the
//! segment vectors.
//!
//! Coordinate frame:
//! - ICRF/J2000 equatorial, kilometres, solar-system barycenter at origin.

pub mod daf;
pub mod naif;
pub mod spk;

#[cfg(test)]
mod proptest_ephemeris;

pub use naif::Target;

use glam::DVec3;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::types::Instant;
use daf::{Daf, DafError};
use spk::{SpkError, SpkSegment};

/// Longest target -> center chain followed before giving up.
const MAX_CHAIN: usize = 16;

#[derive(thiserror::Error, Debug)]
pub enum EphemerisError {
    #[error(transparent)]
    Daf(#[from] DafError),

    #[error(transparent)]
    Spk(#[from] SpkError),

    #[error("ephemeris has no segment for target {0}")]
    UnknownTarget(Target),

    #[error("segment chain for target {0} does not reach the solar-system barycenter")]
    BrokenChain(Target),
}

/// Reference point positions are expressed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Center {
    /// Solar-system barycenter (the kernel's native origin).
    #[default]
    Barycentric,
    /// Center of another ephemeris target, e.g. Earth for geocentric vectors.
    Body(Target),
}

/// Time range covered by the segments for one target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    pub start: f64,
    pub end: f64,
}

/// Anything that can place a target in space at an instant.
///
/// `Sync` so the collector can query it from several threads.
pub trait EphemerisProvider: Sync {
    /// Barycentric position of `target` at `at`, in kilometres.
    fn position_km(&self, target: Target, at: Instant) -> Result<DVec3, EphemerisError>;

    /// Position of `target` relative to `center`, in kilometres.
    fn position_relative(
        &self,
        target: Target,
        center: Center,
        at: Instant,
    ) -> Result<DVec3, EphemerisError> {
        let pos = self.position_km(target, at)?;
        match center {
            Center::Barycentric => Ok(pos),
            Center::Body(origin) if origin == target => Ok(DVec3::ZERO),
            Center::Body(origin) => Ok(pos - self.position_km(origin, at)?),
        }
    }
}

/// SPK-backed ephemeris.
#[derive(Debug)]
pub struct Ephemeris {
    segments: Vec<SpkSegment>,
    /// Segment indices per target, in file order (later segments take precedence).
    by_target: HashMap<Target, Vec<usize>>,
}

impl Ephemeris {
    /// Load an SPK kernel from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EphemerisError> {
        let path = path.as_ref();
        let daf = Daf::load(path)?;
        let ephemeris = Self::from_daf(&daf)?;
        info!(
            "Loaded ephemeris {} ({}, {} segments)",
            path.display(),
            daf.internal_name(),
            ephemeris.segments.len()
        );
        Ok(ephemeris)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EphemerisError> {
        let daf = Daf::from_bytes(bytes)?;
        Self::from_daf(&daf)
    }

    fn from_daf(daf: &Daf) -> Result<Self, EphemerisError> {
        if daf.nd() != spk::SPK_ND || daf.ni() != spk::SPK_NI {
            return Err(SpkError::NotSpk {
                nd: daf.nd(),
                ni: daf.ni(),
            }
            .into());
        }

        let mut segments = Vec::with_capacity(daf.summaries().len());
        let mut by_target: HashMap<Target, Vec<usize>> = HashMap::new();
        for summary in daf.summaries() {
            let segment = SpkSegment::from_summary(daf, summary)?;
            debug!(
                "segment {:?}: {} wrt {} type {} [{}, {}]",
                segment.name,
                segment.target,
                segment.center,
                segment.data_type,
                segment.start,
                segment.end
            );
            by_target
                .entry(segment.target)
                .or_default()
                .push(segments.len());
            segments.push(segment);
        }

        Ok(Self {
            segments,
            by_target,
        })
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    /// Whether any segment describes `target`.
    pub fn has(&self, target: Target) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Targets with at least one segment, sorted by id.
    pub fn targets(&self) -> Vec<Target> {
        let mut targets: Vec<Target> = self.by_target.keys().copied().collect();
        targets.sort();
        targets
    }

    /// Union of the time spans of all segments for `target`.
    pub fn coverage(&self, target: Target) -> Option<Coverage> {
        let indices = self.by_target.get(&target)?;
        indices
            .iter()
            .map(|&i| &self.segments[i])
            .fold(None, |acc: Option<Coverage>, seg| {
                Some(match acc {
                    None => Coverage {
                        start: seg.start,
                        end: seg.end,
                    },
                    Some(c) => Coverage {
                        start: c.start.min(seg.start),
                        end: c.end.max(seg.end),
                    },
                })
            })
    }

    /// The highest-precedence segment for `target` covering `at`.
    fn segment_for(&self, target: Target, at: Instant) -> Result<&SpkSegment, EphemerisError> {
        let indices = self
            .by_target
            .get(&target)
            .ok_or(EphemerisError::UnknownTarget(target))?;

        let candidates = || indices.iter().rev().map(|&i| &self.segments[i]);
        if let Some(seg) = candidates().find(|s| s.covers(at)) {
            return Ok(seg);
        }

        // Nothing covers `at`: report against the highest-precedence segment
        let last = candidates()
            .next()
            .ok_or(EphemerisError::UnknownTarget(target))?;
        Err(SpkError::OutOfRange {
            target,
            time: at.seconds(),
            start: last.start,
            end: last.end,
        }
        .into())
    }
}

impl EphemerisProvider for Ephemeris {
    fn position_km(&self, target: Target, at: Instant) -> Result<DVec3, EphemerisError> {
        let mut pos = DVec3::ZERO;
        let mut current = target;

        for _ in 0..MAX_CHAIN {
            if current == Target::SOLAR_SYSTEM_BARYCENTER {
                return Ok(pos);
            }
            let seg = self.segment_for(current, at)?;
            pos += seg.position(at)?;
            current = seg.center;
        }

        Err(EphemerisError::BrokenChain(target))
    }
}
