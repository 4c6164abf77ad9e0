use serde::{Deserialize, Serialize};

use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};

use super::{BoardError, validate_name};

// ---------------------------------------------------------------------------
// Board columns
// ---------------------------------------------------------------------------

/// The visual arrangement of a board: one ordered id list per status.
///
/// This is where in-flight reordering happens. A task taken out with
/// [`BoardColumns::take`] is detached from every column until it is put
/// back with [`BoardColumns::insert`]; nothing here is persisted until the
/// layout is handed to [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumns {
    #[serde(default)]
    pub todo: Vec<String>,
    #[serde(default)]
    pub inprogress: Vec<String>,
    #[serde(default)]
    pub done: Vec<String>,
}

impl BoardColumns {
    /// Current layout of a task sequence
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut columns = BoardColumns::default();
        for task in tasks {
            columns.column_mut(task.status).push(task.id.clone());
        }
        columns
    }

    pub fn column(&self, status: TaskStatus) -> &[String] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.inprogress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<String> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.inprogress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Detach an id from whichever column holds it.
    /// Returns where it was, or `None` if it is not on the board.
    pub fn take(&mut self, id: &str) -> Option<(TaskStatus, usize)> {
        for status in TaskStatus::ALL {
            let column = self.column_mut(status);
            if let Some(idx) = column.iter().position(|c| c == id) {
                column.remove(idx);
                return Some((status, idx));
            }
        }
        None
    }

    /// Put an id into a column. Indexes past the end append.
    pub fn insert(&mut self, status: TaskStatus, index: usize, id: String) {
        let column = self.column_mut(status);
        let index = index.min(column.len());
        column.insert(index, id);
    }

    /// All ids in board order: todo, then inprogress, then done
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &String)> {
        TaskStatus::ALL
            .into_iter()
            .flat_map(move |s| self.column(s).iter().map(move |id| (s, id)))
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.inprogress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// Append a new `todo` task. Returns its id.
pub fn add_task(project: &mut Project, name: &str, desc: &str) -> Result<String, BoardError> {
    let name = validate_name("task", name)?;
    let task = Task::new(name, desc.trim().to_string());
    let id = task.id.clone();
    project.tasks.push(task);
    Ok(id)
}

/// Remove a task from the project. Returns the removed task.
pub fn delete_task(project: &mut Project, id: &str) -> Result<Task, BoardError> {
    let idx = project
        .tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| BoardError::task_not_found(id))?;
    Ok(project.tasks.remove(idx))
}

// ---------------------------------------------------------------------------
// Move / reorder
// ---------------------------------------------------------------------------

/// Move a task to `status` at position `index` within that column.
///
/// Goes through the same path as a drag-and-drop: take the task off the
/// current layout, drop it at the new spot, reconcile.
pub fn move_task(
    project: &mut Project,
    id: &str,
    status: TaskStatus,
    index: usize,
) -> Result<(), BoardError> {
    let mut columns = BoardColumns::from_tasks(&project.tasks);
    columns
        .take(id)
        .ok_or_else(|| BoardError::task_not_found(id))?;
    columns.insert(status, index, id.to_string());
    reconcile(project, &columns);
    Ok(())
}

/// Rebuild the task sequence from an authoritative layout.
///
/// The result is `todo ++ inprogress ++ done` in the layout's order, and
/// each task's status is set to the column it appears in. Ids not in the
/// project are skipped; an id listed twice keeps its first position.
/// Tasks the layout leaves out keep their status and go to the end of
/// their column, so no task is ever dropped.
pub fn reconcile(project: &mut Project, columns: &BoardColumns) {
    let mut pool: Vec<Option<Task>> = std::mem::take(&mut project.tasks)
        .into_iter()
        .map(Some)
        .collect();
    let mut groups: [Vec<Task>; 3] = Default::default();

    for (slot, status) in TaskStatus::ALL.into_iter().enumerate() {
        for id in columns.column(status) {
            let found = pool.iter_mut().find_map(|entry| {
                if entry.as_ref().is_some_and(|t| t.id == *id) {
                    entry.take()
                } else {
                    None
                }
            });
            match found {
                Some(mut task) => {
                    task.status = status;
                    groups[slot].push(task);
                }
                None => tracing::debug!(id = %id, "skipping unknown task id in layout"),
            }
        }
    }

    for task in pool.into_iter().flatten() {
        let slot = TaskStatus::ALL
            .iter()
            .position(|s| *s == task.status)
            .unwrap_or(0);
        groups[slot].push(task);
    }

    project.tasks = groups.into_iter().flatten().collect();
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find task ids starting with `prefix`. An exact match wins outright.
pub fn match_task_ids<'a>(project: &'a Project, prefix: &str) -> Vec<&'a str> {
    if let Some(task) = project.find_task(prefix) {
        return vec![task.id.as_str()];
    }
    project
        .tasks
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .map(|t| t.id.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
