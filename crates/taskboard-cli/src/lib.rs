//! Library side of the `taskboard` binary: configuration, scenario playback and snapshot files.

pub mod config;
pub mod engine;
pub mod run;
pub mod scenario;
pub mod snapshot;

pub use config::{Config, Overrides};
pub use engine::Simulation;
pub use run::{play, show};
pub use scenario::{load_scenario, Scenario, ScenarioTask};
pub use snapshot::{load_snapshot, SnapshotFile};
