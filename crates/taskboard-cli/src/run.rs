use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use taskboard_core::{Dashboard, Diagnostics, OutputSink};
use tracing::info;

use crate::engine::Simulation;
use crate::scenario::Scenario;
use crate::snapshot::SnapshotFile;

/// Plays a scenario through the dashboard, one render per tick.
///
/// `pace` is the wall-clock sleep between ticks; `None` runs as fast as possible, in which case
/// most intermediate renders are throttled and only the final one is guaranteed.
pub fn play<S: OutputSink>(dashboard: &mut Dashboard<S>, scenario: &Scenario, pace: Option<Duration>) -> Result<Diagnostics> {
    let mut sim = Simulation::new(scenario, Utc::now());
    dashboard.notify_start()?;

    while !sim.is_finished() {
        sim.tick();
        let set = match sim.snapshot() {
            Ok(set) => set,
            Err(err) => {
                dashboard.notify_error(err.to_string())?;
                return Err(err).context("build snapshot set");
            }
        };
        dashboard.render(&set, sim.elapsed())?;
        if let Some(pace) = pace {
            thread::sleep(pace);
        }
    }

    let set = sim.snapshot().context("build final snapshot set")?;
    dashboard.render_final(&set, sim.elapsed())?;
    dashboard.notify_complete(sim.elapsed())?;

    let diagnostics = dashboard.diagnostics();
    info!(
        ticks = sim.ticks(),
        drawn = diagnostics.drawn,
        throttled = diagnostics.throttled,
        "playback finished"
    );
    Ok(diagnostics)
}

/// Renders a captured snapshot once.
pub fn show<S: OutputSink>(dashboard: &mut Dashboard<S>, file: SnapshotFile) -> Result<Diagnostics> {
    let elapsed = file.elapsed;
    let set = file.into_set()?;
    dashboard.render_final(&set, elapsed)?;
    Ok(dashboard.diagnostics())
}
