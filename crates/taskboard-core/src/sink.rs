//! Output sink seam between the reporting core and whatever draws the frame.

use std::io;

use crate::dashboard::Frame;
use crate::format::format_seconds;
use crate::style::{Styled, StyledLine};

/// Where composed frames go.
///
/// The dashboard prefers `overwrite_region` (flicker-free, in place) and falls back to
/// `clear_and_print` when the sink reports that it cannot address the previously drawn region.
/// Each call receives a complete frame; implementations must not write partial frames.
pub trait OutputSink {
    fn supports_regions(&self) -> bool;

    fn overwrite_region(&mut self, frame: &Frame) -> io::Result<()>;

    fn clear_and_print(&mut self, frame: &Frame) -> io::Result<()>;

    /// A single styled line printed above the live region (lifecycle notices).
    fn print_line(&mut self, line: &StyledLine) -> io::Result<()>;
}

/// Lifecycle notices of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Started,
    Error(String),
    /// Total run duration in seconds.
    Completed { duration: f64 },
}

impl Notice {
    pub fn to_line(&self) -> StyledLine {
        match self {
            Notice::Started => Styled::accent("▶ Starting tasks").into(),
            Notice::Error(message) => Styled::severe(format!("✘ Error: {}", message)).into(),
            Notice::Completed { duration } => {
                Styled::success(format!("✔ All tasks finished in {}", format_seconds(*duration))).into()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteKind {
    Overwrite,
    ClearAndPrint,
}

/// In-memory sink for tests. Records every frame and line it is handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub regions: bool,
    pub frames: Vec<(WriteKind, Frame)>,
    pub lines: Vec<StyledLine>,
}

impl RecordingSink {
    pub fn new(regions: bool) -> Self {
        Self { regions, ..Self::default() }
    }

    pub fn writes(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last().map(|(_, frame)| frame)
    }
}

impl OutputSink for RecordingSink {
    fn supports_regions(&self) -> bool {
        self.regions
    }

    fn overwrite_region(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push((WriteKind::Overwrite, frame.clone()));
        Ok(())
    }

    fn clear_and_print(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push((WriteKind::ClearAndPrint, frame.clone()));
        Ok(())
    }

    fn print_line(&mut self, line: &StyledLine) -> io::Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Tone;

    #[test]
    fn notices_are_single_styled_lines() {
        let line = Notice::Error("disk full".into()).to_line();
        assert_eq!(line.plain_text(), "✘ Error: disk full");
        assert_eq!(line.spans()[0].tone, Tone::Severe);

        let line = Notice::Completed { duration: 65.0 }.to_line();
        assert_eq!(line.plain_text(), "✔ All tasks finished in 1m 05s");
        assert_eq!(line.spans()[0].tone, Tone::Success);

        assert_eq!(Notice::Started.to_line().spans()[0].tone, Tone::Accent);
    }
}
