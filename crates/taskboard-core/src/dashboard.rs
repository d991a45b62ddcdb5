//! Composition of the dashboard frame and the render loop state around it.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::classify::Partition;
use crate::config::DashboardConfig;
use crate::error::DashboardResult;
use crate::format::{format_clock, format_seconds};
use crate::memory::memory_cell;
use crate::model::{SnapshotSet, TaskSnapshot, TaskStatus};
use crate::progress::progress_bar;
use crate::sink::{Notice, OutputSink};
use crate::style::{Styled, StyledLine};
use crate::table::{Column, Table};
use crate::throttle::RenderThrottle;
use crate::title::{title_cell, Outcome};
use crate::totals::Summary;
use crate::waits::wait_table;

/// Everything drawn in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Wait list for stacked tasks, verbose mode only.
    pub waits: Option<Table>,
    pub stats: Table,
    /// Finished tasks whose counters don't add up (see [`Outcome::Ambiguous`]).
    pub ambiguous: Vec<String>,
}

impl Frame {
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.waits.iter().chain(std::iter::once(&self.stats))
    }
}

pub fn stats_columns() -> Vec<Column> {
    vec![
        Column::left("Task"),
        Column::right("Count"),
        Column::right("Success"),
        Column::right("Skip"),
        Column::right("Errors"),
        Column::right("Code errors"),
        Column::right("Duration"),
        Column::left("Progress"),
        Column::right("ETA / Finished"),
        Column::right("Memory"),
        Column::left("Message"),
    ]
}

fn number(n: u64) -> StyledLine {
    n.to_string().into()
}

fn eta_cell(task: &TaskSnapshot) -> StyledLine {
    match task.status {
        TaskStatus::Running if task.estimated_duration > 0.0 => format_seconds(task.estimated_duration).into(),
        TaskStatus::Done => task.finished_at.as_ref().map(format_clock).unwrap_or_default().into(),
        _ => StyledLine::new(),
    }
}

pub fn task_row(task: &TaskSnapshot, avg_peak_memory: u64) -> Vec<StyledLine> {
    vec![
        title_cell(task).into(),
        number(task.count),
        number(task.success),
        number(task.skip),
        number(task.error),
        number(task.code_errors),
        format_seconds(task.duration).into(),
        progress_bar(task.progress_percent),
        eta_cell(task),
        memory_cell(task, avg_peak_memory).into(),
        task.message.as_str().into(),
    ]
}

pub fn total_row(summary: &Summary, done: usize, all: usize) -> Vec<StyledLine> {
    let totals = &summary.overall;
    vec![
        Styled::plain(format!("Total ({}/{})", done, all)).into(),
        number(totals.count),
        number(totals.success),
        number(totals.skip),
        number(totals.error),
        number(totals.code_errors),
        format_seconds(totals.duration).into(),
        format!("Saved time: {}", format_seconds(summary.time_saved)).into(),
        format_seconds(summary.elapsed).into(),
        StyledLine::new(),
        StyledLine::new(),
    ]
}

/// Builds the frame for one snapshot set. Pure: no I/O, no state.
///
/// Totals are folded from the partition first and rows are built independently from the same
/// input, so row order never affects the numbers.
pub fn compose(set: &SnapshotSet, elapsed: f64, config: &DashboardConfig) -> Frame {
    let partition = Partition::classify(set);
    let summary = Summary::compute(&partition, elapsed);

    let waits = if config.verbose { wait_table(&partition) } else { None };

    let mut stats = Table::new(stats_columns());
    let finished = config.finished_row_policy().visible(partition.done.values().copied());
    for task in finished.into_iter().chain(partition.running.values().copied()) {
        stats.push_row(task_row(task, summary.avg_peak_memory));
    }
    stats.push_separator();
    stats.push_row(total_row(&summary, partition.done.len(), set.len()));

    let ambiguous = partition
        .done
        .values()
        .filter(|task| Outcome::of(task) == Outcome::Ambiguous)
        .map(|task| task.title.clone())
        .collect();

    Frame { waits, stats, ambiguous }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    Throttled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub drawn: u64,
    pub throttled: u64,
    /// Finished tasks seen with counters that don't add up, summed over drawn passes.
    pub ambiguous_outcomes: u64,
}

/// Live dashboard: throttles, composes and hands frames to a sink.
///
/// Called synchronously once per polling tick by the engine that owns the tasks. The only state
/// kept between calls is the throttle timestamp and the diagnostics counters.
pub struct Dashboard<S> {
    config: DashboardConfig,
    throttle: RenderThrottle,
    sink: S,
    diagnostics: Diagnostics,
}

impl<S: OutputSink> Dashboard<S> {
    pub fn new(config: DashboardConfig, sink: S) -> Self {
        let throttle = RenderThrottle::new(config.throttle_interval());
        Self {
            config,
            throttle,
            sink,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn render(&mut self, set: &SnapshotSet, elapsed: f64) -> DashboardResult<RenderOutcome> {
        self.render_at(set, elapsed, Instant::now())
    }

    pub fn render_at(&mut self, set: &SnapshotSet, elapsed: f64, now: Instant) -> DashboardResult<RenderOutcome> {
        if !self.throttle.should_render(now) {
            self.diagnostics.throttled += 1;
            debug!(tasks = set.len(), "render throttled");
            return Ok(RenderOutcome::Throttled);
        }
        self.throttle.record(now);

        let frame = compose(set, elapsed, &self.config);
        if !frame.ambiguous.is_empty() {
            self.diagnostics.ambiguous_outcomes += frame.ambiguous.len() as u64;
            warn!(tasks = ?frame.ambiguous, "finished tasks with success + skip != count");
        }

        if self.sink.supports_regions() {
            self.sink.overwrite_region(&frame)?;
        } else {
            self.sink.clear_and_print(&frame)?;
        }
        self.diagnostics.drawn += 1;
        Ok(RenderOutcome::Drawn)
    }

    /// Renders regardless of the throttle window, so the final state is always on screen.
    pub fn render_final(&mut self, set: &SnapshotSet, elapsed: f64) -> DashboardResult<RenderOutcome> {
        self.throttle.reset();
        self.render(set, elapsed)
    }

    pub fn notify_start(&mut self) -> DashboardResult<()> {
        info!("run started");
        self.notify(Notice::Started)
    }

    pub fn notify_error(&mut self, message: impl Into<String>) -> DashboardResult<()> {
        let message = message.into();
        warn!(%message, "run error");
        self.notify(Notice::Error(message))
    }

    pub fn notify_complete(&mut self, duration: f64) -> DashboardResult<()> {
        info!(duration, "run completed");
        self.notify(Notice::Completed { duration })
    }

    fn notify(&mut self, notice: Notice) -> DashboardResult<()> {
        self.sink.print_line(&notice.to_line())?;
        Ok(())
    }
}
