use serde::Serialize;

use crate::model::task::{Task, TaskStatus};

/// Number of tasks in each column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub inprogress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.todo + self.inprogress + self.done
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.inprogress,
            TaskStatus::Done => self.done,
        }
    }

    /// Completion percentage for these counts, see [`percent`]
    pub fn percent(&self) -> u8 {
        percent(self.done, self.total())
    }
}

impl std::ops::AddAssign for StatusCounts {
    fn add_assign(&mut self, other: Self) {
        self.todo += other.todo;
        self.inprogress += other.inprogress;
        self.done += other.done;
    }
}

/// Count tasks per status
pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.inprogress += 1,
            TaskStatus::Done => counts.done += 1,
        }
    }
    counts
}

/// Completion percentage of a task sequence (0 for an empty one)
pub fn progress(tasks: &[Task]) -> u8 {
    status_counts(tasks).percent()
}

/// `round(100 * done / total)`, rounding halves up, 0 when `total == 0`.
///
/// Integer arithmetic only: `(200 * done + total) / (2 * total)` is the
/// round-half-up of the exact ratio, so 1/8 (12.5%) gives 13.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    ((200 * done + total) / (2 * total)) as u8
}
