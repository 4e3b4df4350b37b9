//! Grid -> lookups -> JSON, with every dependency passed in.

use tracing::info;

use crate::config::RunConfig;
use crate::ephemeris::EphemerisProvider;
use crate::error::Result;
use crate::output::write_trajectories;
use crate::time::TimeGrid;
use crate::trajectory::{TrajectorySet, collect};

/// Build the grid and collect every configured body.
pub fn compute<P: EphemerisProvider + ?Sized>(
    config: &RunConfig,
    provider: &P,
) -> Result<TrajectorySet> {
    let grid = TimeGrid::hourly(config.start, config.end)?;
    info!(
        "Time grid: {} hourly steps from {} to {}",
        grid.len(),
        config.start,
        config.end
    );

    let set = collect(provider, &config.bodies, &grid, config.center)?;
    info!("Collected trajectories for {} bodies", set.len());
    Ok(set)
}

/// Compute and write the trajectory set to `config.output_path`.
pub fn run<P: EphemerisProvider + ?Sized>(
    config: &RunConfig,
    provider: &P,
) -> Result<TrajectorySet> {
    let set = compute(config, provider)?;
    write_trajectories(&config.output_path, &set)?;
    info!("Wrote {}", config.output_path.display());
    Ok(set)
}
