mod mission; // brings `mission.rs` in as `crate::mission`

use anyhow::Context;
use mission::{FireMission, load_config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Artillery calculator started.");

    match run() {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Fire mission failed: {:#}", e);
            Err(e)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = load_config().context("failed to load fire mission configuration")?;
    let mission = FireMission::from_config(&config).context("invalid fire mission configuration")?;
    info!(?mission, "Fire mission loaded");

    let solver = mission
        .build_solver()
        .context("failed to set up the solver")?;
    let solution = solver
        .solve()
        .with_context(|| format!("cannot solve from origin {}", solver.origin().label()))?;

    info!(
        origin = %solver.origin(),
        target = ?solver.target().map(|t| t.label()),
        grid_size = solver.grid_size(),
        range_m = solution.range,
        bearing_deg = solution.bearing_degrees,
        bearing_mil = solution.bearing_mils,
        "Firing solution computed"
    );

    Ok(())
}
