//! Redraw rate limiting.

use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Gates full redraws to at most one per `interval`.
///
/// `last_render` starts as `None` (never rendered), so the first call always passes. `reset`
/// restores that state for the final render of a run.
#[derive(Clone, Debug)]
pub struct RenderThrottle {
    interval: Duration,
    last_render: Option<Instant>,
}

impl RenderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_render: None }
    }

    pub fn should_render(&self, now: Instant) -> bool {
        match self.last_render {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn record(&mut self, now: Instant) {
        self.last_render = Some(now);
    }

    /// `should_render` + `record` in one step.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let ok = self.should_render(now);
        if ok {
            self.record(now);
        }
        ok
    }

    pub fn reset(&mut self) {
        self.last_render = None;
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
