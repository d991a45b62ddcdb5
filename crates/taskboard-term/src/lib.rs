//! Terminal output for the taskboard dashboard.
//!
//! [`TerminalSink`] turns frames into text with comfy-table, maps tones to crossterm colors and
//! keeps the live region in place by moving the cursor back over the previous frame.

pub mod config;
pub mod paint;
pub mod sink;

pub use config::*;
pub use paint::*;
pub use sink::*;
