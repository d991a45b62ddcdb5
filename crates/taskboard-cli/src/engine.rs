//! Small deterministic task engine driving `taskboard play`.

use std::collections::HashSet;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use taskboard_core::{DashboardResult, SnapshotSet, TaskSnapshot, TaskStatus};
use tracing::debug;

use crate::scenario::{Scenario, ScenarioTask};

#[derive(Debug)]
struct SimTask {
    plan: ScenarioTask,
    status: TaskStatus,
    processed: u64,
    success: u64,
    skip: u64,
    error: u64,
    running_ticks: u64,
    memory_usage: u64,
    memory_peak: u64,
    finished_at: Option<DateTime<Utc>>,
}

impl SimTask {
    fn new(plan: ScenarioTask) -> Self {
        Self {
            plan,
            status: TaskStatus::Stacked,
            processed: 0,
            success: 0,
            skip: 0,
            error: 0,
            running_ticks: 0,
            memory_usage: 0,
            memory_peak: 0,
            finished_at: None,
        }
    }

    fn process_unit(&mut self) {
        self.processed += 1;
        let n = self.processed;
        if self.plan.fail_every > 0 && n % self.plan.fail_every == 0 {
            self.error += 1;
        } else if self.plan.skip_every > 0 && n % self.plan.skip_every == 0 {
            self.skip += 1;
        } else {
            self.success += 1;
        }
    }

    fn advance(&mut self, tick_secs: f64, now: DateTime<Utc>) {
        self.running_ticks += 1;
        let batch = self.plan.per_tick.min(self.plan.units - self.processed);
        for _ in 0..batch {
            self.process_unit();
        }
        self.memory_usage = self.plan.memory_base + self.plan.memory_step * self.running_ticks;
        self.memory_peak = self.memory_peak.max(self.memory_usage);

        if self.processed >= self.plan.units {
            self.status = TaskStatus::Done;
            self.finished_at = Some(now);
            debug!(task = %self.plan.title, secs = self.running_ticks as f64 * tick_secs, "task finished");
        }
    }

    fn snapshot(&self, tick_secs: f64) -> TaskSnapshot {
        let duration = self.running_ticks as f64 * tick_secs;
        let progress_percent = if self.plan.units == 0 {
            if self.status == TaskStatus::Done { 100.0 } else { 0.0 }
        } else {
            self.processed as f64 / self.plan.units as f64 * 100.0
        };
        let estimated_duration = if self.processed > 0 {
            duration * self.plan.units as f64 / self.processed as f64
        } else {
            0.0
        };

        TaskSnapshot {
            count: self.plan.units,
            success: self.success,
            skip: self.skip,
            error: self.error,
            code_errors: if self.status == TaskStatus::Done { self.plan.code_errors } else { 0 },
            duration,
            estimated_duration,
            progress_percent,
            memory_usage: self.memory_usage,
            memory_peak: self.memory_peak,
            message: self.plan.message.clone(),
            finished_at: self.finished_at,
            ..TaskSnapshot::new(self.plan.title.clone(), self.status)
        }
        .with_dependencies(self.plan.depends_on.iter().cloned())
    }
}

/// Advances a [`Scenario`] one tick at a time and reports it as snapshot sets.
#[derive(Debug)]
pub struct Simulation {
    tasks: Vec<SimTask>,
    concurrency: usize,
    tick_secs: f64,
    ticks: u64,
    started_at: DateTime<Utc>,
}

impl Simulation {
    pub fn new(scenario: &Scenario, started_at: DateTime<Utc>) -> Self {
        Self {
            tasks: scenario.tasks.iter().cloned().map(SimTask::new).collect(),
            concurrency: scenario.concurrency,
            tick_secs: scenario.tick_ms as f64 / 1000.0,
            ticks: 0,
            started_at,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since the start of the run.
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.tick_secs
    }

    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(|t| t.status == TaskStatus::Done)
    }

    /// Starts whatever became eligible, then lets every running task process one batch.
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }
        self.ticks += 1;
        self.start_eligible();

        let now = self.started_at + ChronoDuration::milliseconds((self.elapsed() * 1000.0).round() as i64);
        let tick_secs = self.tick_secs;
        for task in self.tasks.iter_mut().filter(|t| t.status == TaskStatus::Running) {
            task.advance(tick_secs, now);
        }
    }

    fn start_eligible(&mut self) {
        let done: HashSet<String> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .map(|t| t.plan.title.clone())
            .collect();
        let mut running = self.tasks.iter().filter(|t| t.status == TaskStatus::Running).count();
        let limit = if self.concurrency == 0 { usize::MAX } else { self.concurrency };

        let eligible = self
            .tasks
            .iter_mut()
            .filter(|t| t.status == TaskStatus::Stacked)
            .filter(|t| t.plan.depends_on.iter().all(|dep| done.contains(dep)));
        for task in eligible {
            if running >= limit {
                break;
            }
            task.status = TaskStatus::Running;
            running += 1;
            debug!(task = %task.plan.title, tick = self.ticks, "task started");
        }
    }

    pub fn snapshot(&self) -> DashboardResult<SnapshotSet> {
        SnapshotSet::from_tasks(self.tasks.iter().map(|t| t.snapshot(self.tick_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, units: u64, per_tick: u64) -> ScenarioTask {
        ScenarioTask {
            title: title.into(),
            units,
            per_tick,
            ..ScenarioTask::default()
        }
    }

    fn scenario(tasks: Vec<ScenarioTask>, concurrency: usize) -> Scenario {
        Scenario {
            tick_ms: 500,
            concurrency,
            tasks,
        }
    }

    fn status_of(sim: &Simulation, title: &str) -> TaskStatus {
        sim.snapshot().unwrap().get(title).unwrap().status
    }

    #[test]
    fn dependent_task_waits_for_its_dependency() {
        let mut b = task("b", 2, 2);
        b.depends_on = vec!["a".into()];
        let mut sim = Simulation::new(&scenario(vec![task("a", 4, 2), b], 0), Utc::now());

        sim.tick();
        assert_eq!(status_of(&sim, "a"), TaskStatus::Running);
        assert_eq!(status_of(&sim, "b"), TaskStatus::Stacked);

        sim.tick();
        assert_eq!(status_of(&sim, "a"), TaskStatus::Done);
        assert_eq!(status_of(&sim, "b"), TaskStatus::Stacked);

        sim.tick();
        assert!(sim.is_finished());
        assert_eq!(sim.elapsed(), 1.5);
    }

    #[test]
    fn concurrency_limit_is_respected() {
        let tasks = vec![task("a", 2, 1), task("b", 2, 1), task("c", 2, 1)];
        let mut sim = Simulation::new(&scenario(tasks, 2), Utc::now());
        sim.tick();
        let set = sim.snapshot().unwrap();
        let running = set.iter().filter(|t| t.status == TaskStatus::Running).count();
        assert_eq!(running, 2);
        assert_eq!(status_of(&sim, "c"), TaskStatus::Stacked);
    }

    #[test]
    fn freed_slot_goes_to_the_first_eligible_task_in_order() {
        let mut c = task("c", 1, 1);
        c.depends_on = vec!["a".into()];
        let tasks = vec![task("a", 1, 1), task("b", 2, 1), c, task("d", 1, 1)];
        let mut sim = Simulation::new(&scenario(tasks, 2), Utc::now());

        sim.tick();
        assert_eq!(status_of(&sim, "a"), TaskStatus::Done);
        assert_eq!(status_of(&sim, "d"), TaskStatus::Stacked);

        // a is done, so c now comes before d
        sim.tick();
        assert_eq!(status_of(&sim, "c"), TaskStatus::Done);
        assert_eq!(status_of(&sim, "d"), TaskStatus::Stacked);
    }

    #[test]
    fn unit_outcomes_follow_the_plan() {
        let mut t = task("mixed", 10, 10);
        t.fail_every = 5;
        t.skip_every = 2;
        t.code_errors = 1;
        let mut sim = Simulation::new(&scenario(vec![t], 0), Utc::now());
        sim.tick();

        let set = sim.snapshot().unwrap();
        let snap = set.get("mixed").unwrap();
        assert_eq!(snap.status, TaskStatus::Done);
        // units 5 and 10 fail; 2, 4, 6, 8 skip
        assert_eq!(snap.error, 2);
        assert_eq!(snap.skip, 4);
        assert_eq!(snap.success, 4);
        assert_eq!(snap.code_errors, 1);
        assert_eq!(snap.progress_percent, 100.0);
        assert!(snap.finished_at.is_some());
    }

    #[test]
    fn running_snapshot_carries_estimate_and_memory() {
        let mut t = task("load", 4, 1);
        t.memory_base = 100;
        t.memory_step = 10;
        let mut sim = Simulation::new(&scenario(vec![t], 0), Utc::now());
        sim.tick();
        sim.tick();

        let set = sim.snapshot().unwrap();
        let snap = set.get("load").unwrap();
        assert_eq!(snap.progress_percent, 50.0);
        assert_eq!(snap.duration, 1.0);
        assert_eq!(snap.estimated_duration, 2.0);
        assert_eq!(snap.memory_usage, 120);
        assert_eq!(snap.memory_peak, 120);
        assert_eq!(snap.code_errors, 0);
    }

    #[test]
    fn empty_task_finishes_on_start() {
        let mut sim = Simulation::new(&scenario(vec![task("noop", 0, 0)], 0), Utc::now());
        sim.tick();
        assert!(sim.is_finished());
        assert_eq!(sim.snapshot().unwrap().get("noop").unwrap().progress_percent, 100.0);
    }
}
