//! Task title with its outcome marker.

use crate::model::TaskSnapshot;
use crate::style::{Styled, Tone};

pub const SUCCESS_MARKER: &str = "✔";
pub const FAILURE_MARKER: &str = "✘";

/// Outcome of a task as far as the title column is concerned.
///
/// Derived from the snapshot on every render, never stored. Order of the checks matters: data
/// errors win over code errors, which win over the success check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pending,
    Succeeded,
    FailedHard,
    FailedCode,
    /// Done without errors, but `success + skip != count`.
    Ambiguous,
}

impl Outcome {
    pub fn of(task: &TaskSnapshot) -> Self {
        if !task.is_done() {
            Outcome::Pending
        } else if task.error > 0 {
            Outcome::FailedHard
        } else if task.code_errors > 0 {
            Outcome::FailedCode
        } else if task.success.saturating_add(task.skip) == task.count {
            Outcome::Succeeded
        } else {
            Outcome::Ambiguous
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Outcome::FailedHard => Tone::Severe,
            Outcome::FailedCode => Tone::Warning,
            Outcome::Succeeded => Tone::Success,
            Outcome::Pending | Outcome::Ambiguous => Tone::Plain,
        }
    }

    pub fn marker(self) -> Option<&'static str> {
        match self {
            Outcome::FailedHard | Outcome::FailedCode => Some(FAILURE_MARKER),
            Outcome::Succeeded => Some(SUCCESS_MARKER),
            Outcome::Pending | Outcome::Ambiguous => None,
        }
    }
}

pub fn title_cell(task: &TaskSnapshot) -> Styled {
    let outcome = Outcome::of(task);
    match outcome.marker() {
        Some(marker) => Styled::new(format!("{} {}", marker, task.title), outcome.tone()),
        None => Styled::plain(task.title.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;

    fn done(count: u64, success: u64, skip: u64, error: u64, code_errors: u64) -> TaskSnapshot {
        TaskSnapshot {
            count,
            success,
            skip,
            error,
            code_errors,
            ..TaskSnapshot::new("import", TaskStatus::Done)
        }
    }

    #[test]
    fn unfinished_tasks_are_pending_whatever_their_counters() {
        let task = TaskSnapshot {
            error: 3,
            ..TaskSnapshot::new("import", TaskStatus::Running)
        };
        assert_eq!(Outcome::of(&task), Outcome::Pending);
        assert_eq!(title_cell(&task), Styled::plain("import"));
    }

    #[test]
    fn data_errors_win() {
        assert_eq!(Outcome::of(&done(10, 8, 0, 2, 5)), Outcome::FailedHard);
        assert_eq!(Outcome::of(&done(10, 10, 0, 2, 0)), Outcome::FailedHard);
        let cell = title_cell(&done(10, 8, 0, 2, 0));
        assert_eq!(cell.text, "✘ import");
        assert_eq!(cell.tone, Tone::Severe);
    }

    #[test]
    fn code_errors_without_data_errors() {
        assert_eq!(Outcome::of(&done(10, 10, 0, 0, 1)), Outcome::FailedCode);
        assert_eq!(title_cell(&done(10, 9, 0, 0, 1)).tone, Tone::Warning);
    }

    #[test]
    fn success_and_skip_covering_count_succeeds() {
        let task = done(10, 8, 2, 0, 0);
        assert_eq!(Outcome::of(&task), Outcome::Succeeded);
        let cell = title_cell(&task);
        assert_eq!(cell.text, "✔ import");
        assert_eq!(cell.tone, Tone::Success);
    }

    #[test]
    fn mismatched_counters_are_ambiguous_and_plain() {
        let task = done(10, 7, 2, 0, 0);
        assert_eq!(Outcome::of(&task), Outcome::Ambiguous);
        assert_eq!(title_cell(&task), Styled::plain("import"));
    }
}
