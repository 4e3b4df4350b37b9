//! JSON output of a trajectory set.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::trajectory::TrajectorySet;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `set` to `path` as one JSON object, replacing any existing file.
///
/// The whole document is written in one pass; there is no temp-file + rename.
pub fn write_trajectories(path: impl AsRef<Path>, set: &TrajectorySet) -> Result<(), OutputError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, set)?;
    writer.flush()?;
    Ok(())
}

/// Read a file written by [`write_trajectories`], keeping key order.
pub fn read_trajectories(path: impl AsRef<Path>) -> Result<TrajectorySet, OutputError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
