use crate::model::project::ProjectMap;
use crate::model::task::Task;
use crate::ops::report::Report;

use super::view::View;

/// What just happened to the application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A namespace was loaded, replacing all in-memory projects
    SessionLoaded { user: Option<String> },
    /// Signed out; in-memory projects were dropped
    SessionCleared,
    ProjectCreated(String),
    ProjectDeleted(String),
    /// A project's task sequence changed (add, delete, move, reorder)
    TasksChanged { project: String },
    ViewChanged(View),
    /// Persistence failed; the session continues in memory only
    StorageUnavailable(String),
}

/// Read-only state handed to subscribers after every change
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub projects: &'a ProjectMap,
    pub view: View,
    pub active_project: Option<&'a str>,
    /// The active project's tasks in board order (empty if none is open)
    pub active_tasks: &'a [Task],
    /// Freshly aggregated over `projects`
    pub report: Report,
}

/// A rendering layer (or anything else) following state changes
pub trait Subscriber {
    fn on_change(&mut self, change: &Change, snapshot: &Snapshot<'_>);
}

impl<F: FnMut(&Change, &Snapshot<'_>)> Subscriber for F {
    fn on_change(&mut self, change: &Change, snapshot: &Snapshot<'_>) {
        self(change, snapshot)
    }
}
