use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::{MoveTo, MoveToPreviousLine};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use taskboard_core::{Frame, OutputSink, StyledLine};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;

use crate::config::{no_color_requested, RenderMode, TerminalConfig};
use crate::paint::{paint_frame, paint_line};

/// Writes frames to a terminal (or any writer).
///
/// Every frame is assembled in memory, cursor movement included, and written with a single
/// `write_all` + `flush`, so a frame is either fully on screen or not at all.
pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
    regions: bool,
    /// Clear-and-print may clear the screen; false when the writer is not a terminal.
    clear_screen: bool,
    /// Screen rows taken by the last frame, wrapped lines included. 0 when there is nothing to
    /// overwrite.
    last_height: usize,
    /// Columns and rows of the screen, when known.
    screen: Option<(u16, u16)>,
    /// Re-read the screen size before every frame.
    live_screen: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout(config: &TerminalConfig) -> Self {
        let out = io::stdout();
        let tty = out.is_terminal();
        Self::from_config(out, tty, config)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool, regions: bool, clear_screen: bool) -> Self {
        Self {
            out,
            color,
            regions,
            clear_screen,
            last_height: 0,
            screen: None,
            live_screen: false,
        }
    }

    /// Color and in-place redraw only make sense on a terminal.
    pub fn from_config(out: W, tty: bool, config: &TerminalConfig) -> Self {
        let color = config.color && tty && !no_color_requested();
        let regions = tty && config.mode == RenderMode::Inline;
        let mut sink = Self::new(out, color, regions, tty);
        sink.live_screen = tty;
        sink
    }

    /// Fixed screen size instead of asking the terminal.
    pub fn with_screen_size(mut self, cols: u16, rows: u16) -> Self {
        self.screen = Some((cols, rows));
        self.live_screen = false;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, buf: &[u8]) -> io::Result<()> {
        self.out.write_all(buf)?;
        self.out.flush()
    }

    fn refresh_screen(&mut self) {
        if self.live_screen {
            self.screen = terminal::size().ok();
        }
    }

    /// Rows `text` occupies once the terminal soft-wraps it.
    fn screen_rows(&self, text: &str) -> usize {
        match self.screen {
            Some((cols, _)) => text.lines().map(|line| wrapped_rows(line, cols)).sum(),
            None => text.lines().count(),
        }
    }

    fn redraw(&mut self, mut text: String, height: usize) -> io::Result<()> {
        let mut buf = Vec::with_capacity(text.len() + 16);
        if self.clear_screen {
            queue!(buf, Clear(ClearType::All), MoveTo(0, 0))?;
        } else {
            // appended output: keep frames apart
            text.push('\n');
        }
        buf.extend_from_slice(text.as_bytes());
        self.emit(&buf)?;
        self.last_height = height;
        Ok(())
    }
}

/// Display width of a painted line, escape sequences excluded.
pub fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI runs until its final byte in '@'..='~'
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}

fn wrapped_rows(line: &str, cols: u16) -> usize {
    let width = visible_width(line);
    let cols = usize::from(cols);
    if width == 0 || cols == 0 {
        1
    } else {
        width.div_ceil(cols)
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn supports_regions(&self) -> bool {
        self.regions
    }

    fn overwrite_region(&mut self, frame: &Frame) -> io::Result<()> {
        self.refresh_screen();
        let text = paint_frame(frame, self.color);
        let height = self.screen_rows(&text);

        // a frame that scrolls the screen can't be reached again with the cursor
        if let Some((_, rows)) = self.screen {
            if height >= usize::from(rows) {
                debug!(height, rows, "frame taller than the screen, redrawing from the top");
                return self.redraw(text, height);
            }
        }

        let mut buf = Vec::with_capacity(text.len() + 16);
        if self.last_height > 0 {
            let up = u16::try_from(self.last_height).unwrap_or(u16::MAX);
            queue!(buf, MoveToPreviousLine(up), Clear(ClearType::FromCursorDown))?;
        }
        buf.extend_from_slice(text.as_bytes());
        self.emit(&buf)?;
        trace!(rows = height, previous = self.last_height, "frame overwritten");
        self.last_height = height;
        Ok(())
    }

    fn clear_and_print(&mut self, frame: &Frame) -> io::Result<()> {
        self.refresh_screen();
        let text = paint_frame(frame, self.color);
        let height = self.screen_rows(&text);
        self.redraw(text, height)
    }

    fn print_line(&mut self, line: &StyledLine) -> io::Result<()> {
        let mut text = paint_line(line, self.color);
        text.push('\n');
        self.emit(text.as_bytes())?;
        // the line now sits below the last frame; the next frame starts under it
        self.last_height = 0;
        Ok(())
    }
}
