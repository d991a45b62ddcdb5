//! Backend-agnostic styled text.
//!
//! The core never emits escape codes. Text is paired with a [`Tone`] and the output sink decides
//! what a tone looks like (a color, a bold weight, or nothing at all in plain mode).

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Severe,
    Warning,
    Success,
    Accent,
    #[default]
    Plain,
}

/// A run of text rendered with a single tone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Styled {
    pub text: String,
    pub tone: Tone,
}

impl Styled {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }

    pub fn severe(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Severe)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Success)
    }

    pub fn accent(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Accent)
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// A sequence of styled runs that belongs on one line (one table cell, one notice).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine(Vec<Styled>);

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Styled) {
        if !span.text.is_empty() {
            self.0.push(span);
        }
    }

    pub fn spans(&self) -> &[Styled] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.0.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.0.iter().map(Styled::width).sum()
    }
}

impl From<Styled> for StyledLine {
    fn from(span: Styled) -> Self {
        let mut line = StyledLine::new();
        line.push(span);
        line
    }
}

impl From<String> for StyledLine {
    fn from(text: String) -> Self {
        Styled::plain(text).into()
    }
}

impl From<&str> for StyledLine {
    fn from(text: &str) -> Self {
        Styled::plain(text).into()
    }
}

impl FromIterator<Styled> for StyledLine {
    fn from_iter<I: IntoIterator<Item = Styled>>(iter: I) -> Self {
        let mut line = StyledLine::new();
        for span in iter {
            line.push(span);
        }
        line
    }
}
