//! Error types for the reporting core.

use thiserror::Error;

/// Errors surfaced by the dashboard.
///
/// Inconsistent counters never end up here: rendering falls back to plain defaults for those.
/// Only inputs that would make the dashboard lie about the run (an unknown status, two tasks
/// sharing a title) and sink I/O failures are reported.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("task {title:?} has unknown status {status:?}")]
    UnknownStatus { title: String, status: String },

    #[error("task {title:?} appears more than once in the snapshot set")]
    DuplicateTitle { title: String },

    #[error("output sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn unknown_status<T: Into<String>, S: Into<String>>(title: T, status: S) -> Self {
        DashboardError::UnknownStatus {
            title: title.into(),
            status: status.into(),
        }
    }

    pub fn duplicate_title<T: Into<String>>(title: T) -> Self {
        DashboardError::DuplicateTitle { title: title.into() }
    }

    /// Title of the offending task, when the error is about one.
    pub fn title(&self) -> Option<&str> {
        match self {
            DashboardError::UnknownStatus { title, .. } | DashboardError::DuplicateTitle { title } => Some(title),
            DashboardError::Sink(_) => None,
        }
    }
}
