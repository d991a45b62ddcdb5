use crate::model::TaskSnapshot;

/// Which finished rows stay on screen.
///
/// Failures are always shown. Otherwise only the most recent `cap` finished tasks are, which keeps
/// the dashboard height bounded on long runs. `None` shows everything, `Some(0)` only failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinishedRowPolicy {
    cap: Option<usize>,
}

impl FinishedRowPolicy {
    pub fn unlimited() -> Self {
        Self { cap: None }
    }

    pub fn capped(cap: usize) -> Self {
        Self { cap: Some(cap) }
    }

    pub fn from_cap(cap: Option<usize>) -> Self {
        Self { cap }
    }

    /// `position` is 1-based over `total` finished tasks.
    pub fn shows(&self, task: &TaskSnapshot, position: usize, total: usize) -> bool {
        if task.has_failures() {
            return true;
        }
        match self.cap {
            None => true,
            Some(0) => false,
            Some(cap) => total.saturating_sub(position) < cap,
        }
    }

    pub fn visible<'a, I>(&self, done: I) -> Vec<&'a TaskSnapshot>
    where
        I: IntoIterator<Item = &'a TaskSnapshot>,
        I::IntoIter: ExactSizeIterator,
    {
        let done = done.into_iter();
        let total = done.len();
        done.enumerate()
            .filter(|(i, task)| self.shows(task, i + 1, total))
            .map(|(_, task)| task)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;

    fn finished(n: usize) -> Vec<TaskSnapshot> {
        (1..=n).map(|i| TaskSnapshot::new(format!("t{i}"), TaskStatus::Done)).collect()
    }

    fn titles(tasks: &[&TaskSnapshot]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn cap_keeps_the_most_recent() {
        let done = finished(5);
        let shown = FinishedRowPolicy::capped(2).visible(done.iter());
        assert_eq!(titles(&shown), vec!["t4", "t5"]);
    }

    #[test]
    fn failures_are_never_hidden() {
        let mut done = finished(5);
        done[0].error = 1;
        let shown = FinishedRowPolicy::capped(2).visible(done.iter());
        assert_eq!(titles(&shown), vec!["t1", "t4", "t5"]);
    }

    #[test]
    fn zero_cap_shows_only_failures() {
        let mut done = finished(4);
        done[2].error = 3;
        let shown = FinishedRowPolicy::capped(0).visible(done.iter());
        assert_eq!(titles(&shown), vec!["t3"]);
    }

    #[test]
    fn unlimited_shows_everything() {
        let done = finished(7);
        assert_eq!(FinishedRowPolicy::unlimited().visible(done.iter()).len(), 7);
        assert_eq!(FinishedRowPolicy::default(), FinishedRowPolicy::from_cap(None));
    }

    #[test]
    fn cap_larger_than_total_shows_everything() {
        let done = finished(3);
        assert_eq!(FinishedRowPolicy::capped(10).visible(done.iter()).len(), 3);
    }
}
