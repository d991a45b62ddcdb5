//! Aggregate counters over running and finished tasks.

use crate::classify::Partition;
use crate::model::TaskSnapshot;

/// Sums over a group of tasks. Built by a fold, never mutated while rows are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub tasks: usize,
    pub count: u64,
    pub success: u64,
    pub skip: u64,
    pub error: u64,
    pub code_errors: u64,
    /// Seconds, summed across tasks (sequential cost).
    pub duration: f64,
    peak_memory_sum: u128,
}

impl Totals {
    pub fn fold<'a, I: IntoIterator<Item = &'a TaskSnapshot>>(tasks: I) -> Self {
        tasks.into_iter().fold(Totals::default(), Totals::add)
    }

    fn add(self, task: &TaskSnapshot) -> Self {
        Totals {
            tasks: self.tasks + 1,
            count: self.count.saturating_add(task.count),
            success: self.success.saturating_add(task.success),
            skip: self.skip.saturating_add(task.skip),
            error: self.error.saturating_add(task.error),
            code_errors: self.code_errors.saturating_add(task.code_errors),
            duration: self.duration + task.duration.max(0.0),
            peak_memory_sum: self.peak_memory_sum + u128::from(task.memory_peak),
        }
    }

    pub fn merge(self, other: Totals) -> Self {
        Totals {
            tasks: self.tasks + other.tasks,
            count: self.count.saturating_add(other.count),
            success: self.success.saturating_add(other.success),
            skip: self.skip.saturating_add(other.skip),
            error: self.error.saturating_add(other.error),
            code_errors: self.code_errors.saturating_add(other.code_errors),
            duration: self.duration + other.duration,
            peak_memory_sum: self.peak_memory_sum + other.peak_memory_sum,
        }
    }

    /// Floor of the mean peak memory, 0 for an empty group.
    pub fn avg_peak_memory(&self) -> u64 {
        if self.tasks == 0 {
            return 0;
        }
        u64::try_from(self.peak_memory_sum / self.tasks as u128).unwrap_or(u64::MAX)
    }

    /// Sequential cost minus wall-clock time, floored at zero.
    pub fn time_saved(&self, elapsed: f64) -> f64 {
        (self.duration - elapsed).max(0.0)
    }
}

/// Totals for one render pass: per category and over running + done.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub running: Totals,
    pub done: Totals,
    pub overall: Totals,
    pub elapsed: f64,
    pub avg_peak_memory: u64,
    pub time_saved: f64,
}

impl Summary {
    /// Stacked tasks contribute nothing.
    pub fn compute(partition: &Partition<'_>, elapsed: f64) -> Self {
        let running = Totals::fold(partition.running.values().copied());
        let done = Totals::fold(partition.done.values().copied());
        let overall = running.merge(done);
        Summary {
            running,
            done,
            overall,
            elapsed,
            avg_peak_memory: overall.avg_peak_memory(),
            time_saved: overall.time_saved(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SnapshotSet, TaskStatus};

    fn task(title: &str, status: TaskStatus, count: u64, duration: f64, peak: u64) -> TaskSnapshot {
        TaskSnapshot {
            count,
            success: count / 2,
            skip: 1,
            error: 1,
            code_errors: 1,
            duration,
            memory_peak: peak,
            ..TaskSnapshot::new(title, status)
        }
    }

    #[test]
    fn empty_union_is_all_zero() {
        let set = SnapshotSet::from_tasks(vec![task("queued", TaskStatus::Stacked, 100, 5.0, 1 << 20)]).unwrap();
        let summary = Summary::compute(&Partition::classify(&set), 3.0);
        assert_eq!(summary.overall, Totals::default());
        assert_eq!(summary.avg_peak_memory, 0);
        assert_eq!(summary.time_saved, 0.0);
    }

    #[test]
    fn sums_running_and_done_only() {
        let set = SnapshotSet::from_tasks(vec![
            task("a", TaskStatus::Done, 10, 4.0, 100),
            task("b", TaskStatus::Running, 20, 6.0, 201),
            task("c", TaskStatus::Stacked, 1000, 50.0, 10_000),
        ])
        .unwrap();
        let summary = Summary::compute(&Partition::classify(&set), 7.0);

        assert_eq!(summary.overall.tasks, 2);
        assert_eq!(summary.overall.count, 30);
        assert_eq!(summary.overall.success, 15);
        assert_eq!(summary.overall.skip, 2);
        assert_eq!(summary.overall.error, 2);
        assert_eq!(summary.overall.code_errors, 2);
        assert_eq!(summary.overall.duration, 10.0);
        assert_eq!(summary.done.count, 10);
        assert_eq!(summary.running.count, 20);
        // floor(301 / 2)
        assert_eq!(summary.avg_peak_memory, 150);
        assert_eq!(summary.time_saved, 3.0);
    }

    #[test]
    fn time_saved_is_never_negative() {
        let totals = Totals::fold([&task("a", TaskStatus::Done, 1, 2.0, 0)]);
        assert_eq!(totals.time_saved(10.0), 0.0);
        assert_eq!(totals.time_saved(f64::NAN), 0.0);
    }

    #[test]
    fn fold_matches_merge_of_halves() {
        let a = task("a", TaskStatus::Done, 3, 1.5, 10);
        let b = task("b", TaskStatus::Done, 5, 2.5, 30);
        assert_eq!(Totals::fold([&a, &b]), Totals::fold([&a]).merge(Totals::fold([&b])));
    }
}
