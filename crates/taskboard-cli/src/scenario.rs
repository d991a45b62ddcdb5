use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

/// Scripted run played back by `taskboard play`.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Simulated seconds per tick, also the wall-clock pace of playback.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Tasks allowed to run at once, 0 for no limit.
    #[serde(default)]
    pub concurrency: usize,
    #[serde(default, rename = "task")]
    pub tasks: Vec<ScenarioTask>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioTask {
    pub title: String,
    pub units: u64,
    /// Units processed per tick.
    pub per_tick: u64,
    /// Every n-th unit fails, 0 for never.
    pub fail_every: u64,
    /// Every n-th unit is skipped, 0 for never. Failure wins when both hit.
    pub skip_every: u64,
    /// Code errors reported when the task finishes.
    pub code_errors: u64,
    pub memory_base: u64,
    /// Memory growth per running tick.
    pub memory_step: u64,
    pub depends_on: Vec<String>,
    pub message: String,
}

fn default_tick_ms() -> u64 {
    100
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let scenario: Scenario = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    scenario.validate().with_context(|| format!("invalid scenario {}", path.display()))?;
    Ok(scenario)
}

impl Scenario {
    /// Rejects scenarios the simulation could never finish.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be positive");
        }

        let mut by_title: IndexMap<&str, &ScenarioTask> = IndexMap::new();
        for task in &self.tasks {
            if task.title.is_empty() {
                bail!("task without a title");
            }
            if by_title.insert(task.title.as_str(), task).is_some() {
                bail!("duplicate task {:?}", task.title);
            }
            if task.units > 0 && task.per_tick == 0 {
                bail!("task {:?} has units but per_tick = 0", task.title);
            }
        }

        for task in &self.tasks {
            for dep in &task.depends_on {
                if dep == &task.title {
                    bail!("task {:?} depends on itself", task.title);
                }
                if !by_title.contains_key(dep.as_str()) {
                    bail!("task {:?} depends on unknown task {:?}", task.title, dep);
                }
            }
        }

        // peel off tasks whose dependencies are all resolved; anything left is a cycle
        let mut resolved: Vec<&str> = Vec::with_capacity(self.tasks.len());
        loop {
            let before = resolved.len();
            for (title, task) in &by_title {
                if !resolved.contains(title) && task.depends_on.iter().all(|d| resolved.contains(&d.as_str())) {
                    resolved.push(*title);
                }
            }
            if resolved.len() == before {
                break;
            }
        }
        if resolved.len() < by_title.len() {
            let stuck: Vec<&str> = by_title.keys().copied().filter(|t| !resolved.contains(t)).collect();
            bail!("dependency cycle between {:?}", stuck);
        }
        Ok(())
    }
}
