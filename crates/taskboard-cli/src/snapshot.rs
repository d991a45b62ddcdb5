use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use taskboard_core::{SnapshotSet, TaskRecord};

/// A captured point in a run, rendered once by `taskboard show`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotFile {
    /// Seconds since the run started.
    pub elapsed: f64,
    #[serde(rename = "task")]
    pub tasks: Vec<TaskRecord>,
}

impl SnapshotFile {
    pub fn into_set(self) -> Result<SnapshotSet> {
        SnapshotSet::from_records(self.tasks).context("convert task records")
    }
}

pub fn load_snapshot(path: &Path) -> Result<SnapshotFile> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: SnapshotFile = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::TaskStatus;

    #[test]
    fn records_convert_in_file_order() {
        let file: SnapshotFile = toml::from_str(
            r#"
elapsed = 4.5

[[task]]
title = "fetch"
status = "Done"
count = 2
success = 2
finished_at = "2026-10-19T08:30:00Z"

[[task]]
title = "parse"
status = "stacked"
dependencies = ["fetch"]
"#,
        )
        .unwrap();
        assert_eq!(file.elapsed, 4.5);

        let set = file.into_set().unwrap();
        let titles: Vec<&str> = set.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["fetch", "parse"]);
        assert_eq!(set.get("fetch").unwrap().status, TaskStatus::Done);
        assert!(set.get("fetch").unwrap().finished_at.is_some());
    }

    #[test]
    fn unknown_status_fails_the_whole_file() {
        let file: SnapshotFile = toml::from_str("[[task]]\ntitle = \"x\"\nstatus = \"paused\"\n").unwrap();
        let err = file.into_set().unwrap_err();
        assert!(format!("{err:#}").contains("paused"));
    }
}
