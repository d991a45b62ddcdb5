//! Fixed-width progress bar.

use crate::format::format_percent;
use crate::style::{Styled, StyledLine};

/// Number of cells in a bar.
pub const BAR_WIDTH: usize = 20;

const FULL: char = '█';
const DOT: char = '·';

/// Glyph for the partially filled cell after the full ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartialCell {
    Quarter,
    Half,
    ThreeQuarter,
}

impl PartialCell {
    /// Tier for the fractional remainder of the last cell, `frac` in [0, 1).
    pub fn for_fraction(frac: f64) -> Option<Self> {
        if frac >= 0.66 {
            Some(PartialCell::ThreeQuarter)
        } else if frac >= 0.33 {
            Some(PartialCell::Half)
        } else if frac > 0.0 {
            Some(PartialCell::Quarter)
        } else {
            None
        }
    }

    pub fn glyph(self) -> char {
        match self {
            PartialCell::Quarter => '▎',
            PartialCell::Half => '▌',
            PartialCell::ThreeQuarter => '▊',
        }
    }
}

pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Number of full cells and the optional partial cell for `percent`.
pub fn bar_cells(percent: f64) -> (usize, Option<PartialCell>) {
    let fill = clamp_percent(percent) / 100.0 * BAR_WIDTH as f64;
    let full = (fill.floor() as usize).min(BAR_WIDTH);
    let partial = if full == BAR_WIDTH { None } else { PartialCell::for_fraction(fill - full as f64) };
    (full, partial)
}

/// Bar plus label: the filled part (accent), the dot placeholders (plain) and the percentage
/// right-aligned in five columns.
pub fn progress_bar(percent: f64) -> StyledLine {
    let percent = clamp_percent(percent);
    let (full, partial) = bar_cells(percent);

    let mut filled: String = std::iter::repeat(FULL).take(full).collect();
    if let Some(cell) = partial {
        filled.push(cell.glyph());
    }
    let used = full + usize::from(partial.is_some());
    let dots: String = std::iter::repeat(DOT).take(BAR_WIDTH - used).collect();

    let mut line = StyledLine::new();
    line.push(Styled::accent(filled));
    line.push(Styled::plain(dots));
    line.push(Styled::plain(format!(" {:>5}%", format_percent(percent))));
    line
}
