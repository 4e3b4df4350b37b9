//! Trajectories - hourly solar-system positions from a JPL ephemeris
//!
//! Reads `de432s.bsp` from the working directory and writes the 2023 hourly
//! positions of the default body list to `trajectories.json`.
//!
//! Logs go to stderr; `RUST_LOG` overrides the default `trajectories=info` filter.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use trajectories::config::RunConfig;
use trajectories::ephemeris::Ephemeris;
use trajectories::pipeline;

fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trajectories=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = RunConfig::default();

    let ephemeris = Ephemeris::load(&config.ephemeris_path)
        .with_context(|| format!("failed to load ephemeris {}", config.ephemeris_path.display()))?;

    pipeline::run(&config, &ephemeris).with_context(|| {
        format!(
            "failed to compute trajectories into {}",
            config.output_path.display()
        )
    })?;

    println!("Trajectories saved to {}", config.output_path.display());
    Ok(())
}
