//! Named bodies and the ephemeris targets they are looked up under.

use crate::ephemeris::Target;

/// A display name paired with the ephemeris target it reads.
///
/// Several names may share one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub name: String,
    pub target: Target,
}

impl Body {
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// Default run, in output order.
///
/// Phobos and Deimos read the Mars barycenter, Io and Europa the Jupiter
/// barycenter: `de432s` carries no satellite segments, so their output is
/// their system barycenter's track.
pub const DEFAULT_BODIES: &[(&str, Target)] = &[
    ("Sun", Target::SUN),
    ("Mercury", Target::MERCURY),
    ("Venus", Target::VENUS),
    ("Earth", Target::EARTH),
    ("Mars", Target::MARS_BARYCENTER),
    ("Jupiter", Target::JUPITER_BARYCENTER),
    ("Saturn", Target::SATURN_BARYCENTER),
    ("Uranus", Target::URANUS_BARYCENTER),
    ("Neptune", Target::NEPTUNE_BARYCENTER),
    ("Moon", Target::MOON),
    ("Phobos", Target::MARS_BARYCENTER),
    ("Deimos", Target::MARS_BARYCENTER),
    ("Io", Target::JUPITER_BARYCENTER),
    ("Europa", Target::JUPITER_BARYCENTER),
];

pub fn default_bodies() -> Vec<Body> {
    DEFAULT_BODIES
        .iter()
        .map(|&(name, target)| Body::new(name, target))
        .collect()
}
