//! Position collection over a time grid.
//!
//! Bodies are independent, so their lookups run on the rayon pool; the
//! resulting set keeps the order of the input body list.

use glam::DVec3;
use rayon::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::bodies::Body;
use crate::ephemeris::{Center, EphemerisError, EphemerisProvider, Target};
use crate::time::TimeGrid;
use crate::types::{Position, to_triple};

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("position lookup failed for {body} (target {target})")]
    Lookup {
        body: String,
        target: Target,
        #[source]
        source: EphemerisError,
    },
}

/// Body name -> positions, index-aligned with the time grid.
///
/// Iteration and serialization follow insertion order; `index` maps a name
/// to its slot in `entries`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrajectorySet {
    entries: Vec<(String, Vec<Position>)>,
    index: HashMap<String, usize>,
}

impl TrajectorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a trajectory. A replaced name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, positions: Vec<Position>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = positions,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, positions));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Position]> {
        self.index
            .get(name)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Position])> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Triples<'a>(&'a [Position]);

impl Serialize for Triples<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|&p| to_triple(p)))
    }
}

impl Serialize for TrajectorySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, positions) in &self.entries {
            map.serialize_entry(name, &Triples(positions))?;
        }
        map.end()
    }
}

struct TrajectorySetVisitor;

impl<'de> Visitor<'de> for TrajectorySetVisitor {
    type Value = TrajectorySet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from body name to a list of [x, y, z] triples")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = TrajectorySet::new();
        while let Some((name, triples)) = access.next_entry::<String, Vec<[f64; 3]>>()? {
            set.insert(name, triples.into_iter().map(DVec3::from_array).collect());
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for TrajectorySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TrajectorySetVisitor)
    }
}

/// Positions of one target at every grid instant, in grid order.
pub fn collect_trajectory<P: EphemerisProvider + ?Sized>(
    provider: &P,
    target: Target,
    center: Center,
    grid: &TimeGrid,
) -> Result<Vec<Position>, EphemerisError> {
    grid.instants()
        .iter()
        .map(|&at| provider.position_relative(target, center, at))
        .collect()
}

/// Query every body across the whole grid.
///
/// Names sharing a target reuse one lookup. The first failure aborts the
/// run; no partial set is returned.
pub fn collect<P: EphemerisProvider + ?Sized>(
    provider: &P,
    bodies: &[Body],
    grid: &TimeGrid,
    center: Center,
) -> Result<TrajectorySet, CollectError> {
    let mut unique: Vec<&Body> = Vec::new();
    for body in bodies {
        if !unique.iter().any(|b| b.target == body.target) {
            unique.push(body);
        }
    }

    let computed: HashMap<Target, Vec<Position>> = unique
        .par_iter()
        .map(|body| {
            let positions = collect_trajectory(provider, body.target, center, grid).map_err(
                |source| CollectError::Lookup {
                    body: body.name.clone(),
                    target: body.target,
                    source,
                },
            )?;
            debug!("{}: {} positions", body.name, positions.len());
            Ok::<_, CollectError>((body.target, positions))
        })
        .collect::<Result<_, CollectError>>()?;

    let mut set = TrajectorySet::new();
    for body in bodies {
        let positions = computed.get(&body.target).cloned().unwrap_or_default();
        set.insert(body.name.clone(), positions);
    }
    Ok(set)
}
