//! NAIF integer ids for the bodies found in standard planetary kernels.

use std::fmt;

/// A NAIF body id (e.g. 399 = Earth, 4 = Mars barycenter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target(pub i32);

impl Target {
    pub const SOLAR_SYSTEM_BARYCENTER: Target = Target(0);
    pub const MERCURY_BARYCENTER: Target = Target(1);
    pub const VENUS_BARYCENTER: Target = Target(2);
    pub const EARTH_MOON_BARYCENTER: Target = Target(3);
    pub const MARS_BARYCENTER: Target = Target(4);
    pub const JUPITER_BARYCENTER: Target = Target(5);
    pub const SATURN_BARYCENTER: Target = Target(6);
    pub const URANUS_BARYCENTER: Target = Target(7);
    pub const NEPTUNE_BARYCENTER: Target = Target(8);
    pub const PLUTO_BARYCENTER: Target = Target(9);
    pub const SUN: Target = Target(10);
    pub const MERCURY: Target = Target(199);
    pub const VENUS: Target = Target(299);
    pub const MOON: Target = Target(301);
    pub const EARTH: Target = Target(399);

    /// Look up a target by its kernel name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Target> {
        let wanted = name.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|&(_, id)| Target(id))
    }

    /// Canonical kernel name, if the id is a known one.
    pub fn name(&self) -> Option<&'static str> {
        NAMES.iter().find(|(_, id)| *id == self.0).map(|&(n, _)| n)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// First entry for an id is its canonical name.
const NAMES: &[(&str, i32)] = &[
    ("solar system barycenter", 0),
    ("ssb", 0),
    ("mercury barycenter", 1),
    ("venus barycenter", 2),
    ("earth barycenter", 3),
    ("earth-moon barycenter", 3),
    ("emb", 3),
    ("mars barycenter", 4),
    ("jupiter barycenter", 5),
    ("saturn barycenter", 6),
    ("uranus barycenter", 7),
    ("neptune barycenter", 8),
    ("pluto barycenter", 9),
    ("sun", 10),
    ("mercury", 199),
    ("venus", 299),
    ("moon", 301),
    ("earth", 399),
    ("phobos", 401),
    ("deimos", 402),
    ("mars", 499),
    ("io", 501),
    ("europa", 502),
    ("ganymede", 503),
    ("callisto", 504),
    ("jupiter", 599),
    ("titan", 606),
    ("saturn", 699),
    ("uranus", 799),
    ("neptune", 899),
    ("pluto", 999),
];
