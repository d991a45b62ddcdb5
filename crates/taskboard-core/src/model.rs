use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Stacked,
    Running,
    Done,
}

impl TaskStatus {
    /// Case-insensitive parse of the textual status used by inbound records.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stacked" => Some(TaskStatus::Stacked),
            "running" => Some(TaskStatus::Running),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Stacked => "stacked",
            TaskStatus::Running => "running",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only, point-in-time view of one task.
///
/// The engine that owns the task produces a fresh value every polling tick; the dashboard never
/// mutates it and never keeps it past a single render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSnapshot {
    pub title: String,
    pub status: TaskStatus,
    /// Total units of work assigned to the task.
    pub count: u64,
    pub success: u64,
    pub skip: u64,
    /// Data-level failures.
    pub error: u64,
    /// Defect/crash-level failures in the task's own logic.
    pub code_errors: u64,
    /// Seconds spent so far.
    pub duration: f64,
    /// Projected total seconds, only meaningful while running.
    pub estimated_duration: f64,
    pub progress_percent: f64,
    pub memory_usage: u64,
    pub memory_peak: u64,
    pub message: String,
    pub finished_at: Option<DateTime<Utc>>,
    /// Titles this task runs after, only meaningful while stacked.
    pub dependencies: IndexSet<String>,
}

impl TaskSnapshot {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status,
            count: 0,
            success: 0,
            skip: 0,
            error: 0,
            code_errors: 0,
            duration: 0.0,
            estimated_duration: 0.0,
            progress_percent: 0.0,
            memory_usage: 0,
            memory_peak: 0,
            message: String::new(),
            finished_at: None,
            dependencies: IndexSet::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn has_failures(&self) -> bool {
        self.error > 0
    }
}

/// Inbound task record as collaborators serialize it: status as text, every field defaulted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    pub title: String,
    pub status: String,
    pub count: u64,
    pub success: u64,
    pub skip: u64,
    pub error: u64,
    pub code_errors: u64,
    pub duration: f64,
    pub estimated_duration: f64,
    pub progress_percent: f64,
    pub memory_usage: u64,
    pub memory_peak: u64,
    pub message: String,
    pub finished_at: Option<DateTime<Utc>>,
    pub dependencies: Vec<String>,
}

impl TryFrom<TaskRecord> for TaskSnapshot {
    type Error = DashboardError;

    fn try_from(record: TaskRecord) -> DashboardResult<Self> {
        let status = TaskStatus::parse(&record.status)
            .ok_or_else(|| DashboardError::unknown_status(&record.title, &record.status))?;

        Ok(TaskSnapshot {
            // finished_at only carries meaning once the task is done
            finished_at: if status == TaskStatus::Done { record.finished_at } else { None },
            title: record.title,
            status,
            count: record.count,
            success: record.success,
            skip: record.skip,
            error: record.error,
            code_errors: record.code_errors,
            duration: record.duration.max(0.0),
            estimated_duration: record.estimated_duration.max(0.0),
            progress_percent: record.progress_percent,
            memory_usage: record.memory_usage,
            memory_peak: record.memory_peak,
            message: record.message,
            dependencies: record.dependencies.into_iter().collect(),
        })
    }
}

/// Ordered mapping title -> snapshot, in the order the engine reported the tasks.
#[derive(Clone, Debug, Default)]
pub struct SnapshotSet {
    tasks: IndexMap<String, TaskSnapshot>,
}

impl SnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks<I: IntoIterator<Item = TaskSnapshot>>(tasks: I) -> DashboardResult<Self> {
        let mut set = Self::new();
        for task in tasks {
            set.insert(task)?;
        }
        Ok(set)
    }

    pub fn from_records<I: IntoIterator<Item = TaskRecord>>(records: I) -> DashboardResult<Self> {
        let mut set = Self::new();
        for record in records {
            set.insert(TaskSnapshot::try_from(record)?)?;
        }
        Ok(set)
    }

    /// Titles are unique across a set; a second task with the same title is rejected.
    pub fn insert(&mut self, task: TaskSnapshot) -> DashboardResult<()> {
        if self.tasks.contains_key(&task.title) {
            return Err(DashboardError::duplicate_title(task.title));
        }
        self.tasks.insert(task.title.clone(), task);
        Ok(())
    }

    pub fn get(&self, title: &str) -> Option<&TaskSnapshot> {
        self.tasks.get(title)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TaskSnapshot> + '_ {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
