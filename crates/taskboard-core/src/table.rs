//! Backend-agnostic table model handed to output sinks.

use crate::style::StyledLine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub align: Align,
}

impl Column {
    pub fn left(title: impl Into<String>) -> Self {
        Self { title: title.into(), align: Align::Left }
    }

    pub fn right(title: impl Into<String>) -> Self {
        Self { title: title.into(), align: Align::Right }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    Cells(Vec<StyledLine>),
    /// Horizontal rule across every column.
    Separator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Rows are padded with empty cells (or truncated) to the column count.
    pub fn push_row(&mut self, mut cells: Vec<StyledLine>) {
        cells.resize_with(self.columns.len(), StyledLine::new);
        self.rows.push(TableRow::Cells(cells));
    }

    pub fn push_separator(&mut self) {
        self.rows.push(TableRow::Separator);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Rows with cells, separators skipped.
    pub fn data_rows(&self) -> impl Iterator<Item = &[StyledLine]> + '_ {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Cells(cells) => Some(cells.as_slice()),
            TableRow::Separator => None,
        })
    }

    /// Widest header or cell per column, in terminal columns.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| unicode_width::UnicodeWidthStr::width(c.title.as_str())).collect();
        for cells in self.data_rows() {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}
