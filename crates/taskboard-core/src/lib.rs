//! Reporting core for a live task dashboard.
//!
//! The engine that runs the tasks hands over a [`SnapshotSet`] and the elapsed wall time once per
//! polling tick; [`Dashboard`] throttles, composes a [`Frame`] of styled tables and passes it to
//! an [`OutputSink`]. Everything below the dashboard is a pure function of the snapshot.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod memory;
pub mod model;
pub mod progress;
pub mod sink;
pub mod style;
pub mod table;
pub mod throttle;
pub mod title;
pub mod totals;
pub mod visibility;
pub mod waits;

pub use classify::*;
pub use config::*;
pub use dashboard::*;
pub use error::*;
pub use model::*;
pub use sink::*;
pub use style::*;
pub use table::*;
pub use throttle::*;
pub use title::*;
pub use totals::*;
pub use visibility::*;
