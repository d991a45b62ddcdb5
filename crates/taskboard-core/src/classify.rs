use indexmap::IndexMap;

use crate::model::{SnapshotSet, TaskSnapshot, TaskStatus};

/// A snapshot set split by status. Each part keeps the set's relative order.
#[derive(Clone, Debug, Default)]
pub struct Partition<'a> {
    pub stacked: IndexMap<&'a str, &'a TaskSnapshot>,
    pub running: IndexMap<&'a str, &'a TaskSnapshot>,
    pub done: IndexMap<&'a str, &'a TaskSnapshot>,
}

impl<'a> Partition<'a> {
    pub fn classify(set: &'a SnapshotSet) -> Self {
        let mut partition = Partition::default();
        for task in set.iter() {
            let part = match task.status {
                TaskStatus::Stacked => &mut partition.stacked,
                TaskStatus::Running => &mut partition.running,
                TaskStatus::Done => &mut partition.done,
            };
            part.insert(task.title.as_str(), task);
        }
        partition
    }

    pub fn is_running(&self, title: &str) -> bool {
        self.running.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.stacked.len() + self.running.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Running tasks followed by done tasks: everything that counts towards the totals.
    pub fn active(&self) -> impl Iterator<Item = &'a TaskSnapshot> + '_ {
        self.running.values().chain(self.done.values()).copied()
    }
}
