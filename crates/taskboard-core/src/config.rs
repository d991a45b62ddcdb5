use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::throttle::DEFAULT_INTERVAL;
use crate::visibility::FinishedRowPolicy;

/// Dashboard settings, the `[dashboard]` table of `taskboard.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Finished rows kept on screen besides failures. Unset shows all, 0 shows failures only.
    pub max_finished_rows: Option<usize>,
    /// Render the wait-list table for stacked tasks.
    pub verbose: bool,
    pub throttle_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_finished_rows: None,
            verbose: false,
            throttle_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl DashboardConfig {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn finished_row_policy(&self) -> FinishedRowPolicy {
        FinishedRowPolicy::from_cap(self.max_finished_rows)
    }
}
