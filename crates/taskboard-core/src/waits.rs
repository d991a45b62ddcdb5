//! Wait list: which dependencies each stacked task is still queued behind.

use crate::classify::Partition;
use crate::style::{Styled, StyledLine};
use crate::table::{Column, Table};

pub const WAIT_SEPARATOR: &str = " · ";
/// Prefix for a dependency that is running right now.
pub const ACTIVE_MARKER: &str = "▶ ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitRow {
    pub title: Styled,
    pub dependencies: StyledLine,
}

pub fn wait_rows(partition: &Partition<'_>) -> Vec<WaitRow> {
    partition
        .stacked
        .values()
        .map(|task| {
            let mut dependencies = StyledLine::new();
            for (i, dep) in task.dependencies.iter().enumerate() {
                if i > 0 {
                    dependencies.push(Styled::plain(WAIT_SEPARATOR));
                }
                if partition.is_running(dep) {
                    dependencies.push(Styled::accent(format!("{ACTIVE_MARKER}{dep}")));
                } else {
                    dependencies.push(Styled::plain(dep.clone()));
                }
            }
            WaitRow { title: Styled::plain(task.title.clone()), dependencies }
        })
        .collect()
}

/// `None` when nothing is stacked: no header-only table.
pub fn wait_table(partition: &Partition<'_>) -> Option<Table> {
    if partition.stacked.is_empty() {
        return None;
    }
    let mut table = Table::new(vec![Column::left("Waiting"), Column::left("Runs after")]);
    for row in wait_rows(partition) {
        table.push_row(vec![row.title.into(), row.dependencies]);
    }
    Some(table)
}
