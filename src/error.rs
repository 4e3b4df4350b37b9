//! Crate-level error type.

use crate::ephemeris::EphemerisError;
use crate::output::OutputError;
use crate::time::TimeError;
use crate::trajectory::CollectError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
