//! Frame -> text.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table as TextTable};
use crossterm::style::{style, Stylize};
use taskboard_core::{Align, Frame, Styled, StyledLine, Table, TableRow, Tone};

const RULE: &str = "─";

pub fn paint_span(span: &Styled, color: bool) -> String {
    if !color {
        return span.text.clone();
    }
    let text = span.text.as_str();
    match span.tone {
        Tone::Severe => style(text).red().bold().to_string(),
        Tone::Warning => style(text).yellow().to_string(),
        Tone::Success => style(text).green().to_string(),
        Tone::Accent => style(text).cyan().to_string(),
        Tone::Plain => text.to_string(),
    }
}

pub fn paint_line(line: &StyledLine, color: bool) -> String {
    line.spans().iter().map(|span| paint_span(span, color)).collect()
}

pub fn paint_table(table: &Table, color: bool) -> String {
    let mut out = TextTable::new();
    out.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(table.columns().iter().map(|c| Cell::new(&c.title)));

    let widths = table.column_widths();
    for row in table.rows() {
        match row {
            TableRow::Cells(cells) => {
                out.add_row(cells.iter().map(|cell| Cell::new(paint_line(cell, color))));
            }
            TableRow::Separator => {
                out.add_row(widths.iter().map(|w| Cell::new(RULE.repeat(*w))));
            }
        }
    }

    for (i, column) in table.columns().iter().enumerate() {
        if column.align == Align::Right {
            if let Some(col) = out.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
    }
    out.to_string()
}

/// All tables of the frame, blank line between them, trailing newline.
pub fn paint_frame(frame: &Frame, color: bool) -> String {
    let mut text = frame.tables().map(|t| paint_table(t, color)).collect::<Vec<_>>().join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::Column;

    #[test]
    fn plain_mode_has_no_escape_codes() {
        assert_eq!(paint_span(&Styled::severe("boom"), false), "boom");
        let painted = paint_span(&Styled::severe("boom"), true);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("boom"));
        assert_eq!(paint_span(&Styled::plain("calm"), true), "calm");
    }

    #[test]
    fn separator_rows_span_each_column() {
        let mut table = Table::new(vec![Column::left("Task"), Column::right("Count")]);
        table.push_row(vec!["import".into(), "12".into()]);
        table.push_separator();
        table.push_row(vec!["Total (1/1)".into(), "12".into()]);
        let text = paint_table(&table, false);
        // top border, the separator row, bottom border
        assert!(text.lines().filter(|l| l.contains(&RULE.repeat(11))).count() >= 3);
        assert!(text.contains("Total (1/1)"));
    }
}
