use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use taskboard_core::DashboardConfig;
use taskboard_term::{RenderMode, TerminalConfig};

/// Contents of `taskboard.toml`. Both tables are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub terminal: TerminalConfig,
}

/// Command-line values that win over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub verbose: bool,
    pub max_finished_rows: Option<usize>,
    pub no_color: bool,
    pub redraw: bool,
}

impl Config {
    pub const FILE_NAME: &'static str = "taskboard.toml";

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    /// An explicit path must exist; otherwise `taskboard.toml` in `dir` is used when present.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path(dir);
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(Self::FILE_NAME)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if overrides.verbose {
            self.dashboard.verbose = true;
        }
        if let Some(cap) = overrides.max_finished_rows {
            self.dashboard.max_finished_rows = Some(cap);
        }
        if overrides.no_color {
            self.terminal.color = false;
        }
        if overrides.redraw {
            self.terminal.mode = RenderMode::Redraw;
        }
    }
}
