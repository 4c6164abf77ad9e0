use crate::io::repository::{load_projects, save_projects};
use crate::io::state::Session;
use crate::io::store::KeyValueStore;
use crate::model::project::{Project, ProjectMap};
use crate::model::task::{Task, TaskStatus};
use crate::ops::progress::{StatusCounts, progress, status_counts};
use crate::ops::report::{Report, aggregate};
use crate::ops::task_ops::{self, BoardColumns};
use crate::ops::{BoardError, project_ops, validate_name};

use super::confirm::Confirm;
use super::notify::{Change, Snapshot, Subscriber};
use super::view::{View, ViewCoordinator};

/// Outcome of a confirmed destructive action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

/// The application state: one namespace's projects plus the view pointers.
///
/// All mutation goes through these methods. Each one validates first,
/// mutates, persists the namespace, then notifies subscribers. If a save
/// fails the state keeps working in memory and stops writing for the rest
/// of the session.
pub struct AppState<S: KeyValueStore> {
    store: S,
    user: Option<String>,
    projects: ProjectMap,
    views: ViewCoordinator,
    degraded: bool,
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Start in the shared namespace (nobody signed in)
    pub fn new(store: S) -> Self {
        let mut state = AppState {
            store,
            user: None,
            projects: ProjectMap::new(),
            views: ViewCoordinator::new(),
            degraded: false,
            subscribers: Vec::new(),
        };
        state.load_namespace();
        state
    }

    /// Resume a saved session. An active project that no longer exists
    /// is dropped.
    pub fn restore(store: S, session: &Session) -> Self {
        let mut state = AppState {
            store,
            user: session.user.clone().filter(|u| !u.is_empty()),
            projects: ProjectMap::new(),
            views: ViewCoordinator::new(),
            degraded: false,
            subscribers: Vec::new(),
        };
        state.load_namespace();
        let active = session
            .active_project
            .clone()
            .filter(|name| state.projects.contains_key(name));
        state.views = ViewCoordinator::restore(session.view, active);
        state
    }

    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Switch to `user`'s namespace, replacing everything in memory.
    pub fn sign_in(&mut self, user: &str) -> Result<(), BoardError> {
        let user = validate_name("user", user)?;
        tracing::info!(%user, "signing in");
        self.user = Some(user);
        self.views.reset();
        self.load_namespace();
        self.emit(Change::SessionLoaded {
            user: self.user.clone(),
        });
        Ok(())
    }

    /// Drop the user and all in-memory projects. Stored data is untouched.
    pub fn sign_out(&mut self) {
        tracing::info!(user = ?self.user, "signing out");
        self.user = None;
        self.projects.clear();
        self.views.reset();
        self.emit(Change::SessionCleared);
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Pointers worth saving between runs
    pub fn session(&self) -> Session {
        Session {
            user: self.user.clone(),
            view: self.views.view(),
            active_project: self.views.active_project().map(str::to_string),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn projects(&self) -> &ProjectMap {
        &self.projects
    }

    pub fn get_project(&self, name: &str) -> Result<&Project, BoardError> {
        project_ops::get_project(&self.projects, name)
    }

    pub fn view(&self) -> View {
        self.views.view()
    }

    pub fn active_project(&self) -> Option<&str> {
        self.views.active_project()
    }

    /// The open project's tasks in board order, or nothing
    pub fn active_tasks(&self) -> &[Task] {
        self.views
            .active_project()
            .and_then(|name| self.projects.get(name))
            .map(|p| p.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// True once a load or save has failed; nothing is written afterwards
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub fn create_project(&mut self, name: &str, deadline: Option<&str>) -> Result<String, BoardError> {
        let name = project_ops::create_project(&mut self.projects, name, deadline)?;
        self.persist();
        self.emit(Change::ProjectCreated(name.clone()));
        Ok(name)
    }

    /// Delete a project and its tasks once `confirm` agrees.
    pub fn delete_project(
        &mut self,
        name: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<Deletion, BoardError> {
        self.get_project(name)?;
        let prompt = format!("Delete project \"{}\"? This cannot be undone.", name);
        if !confirm.confirm(&prompt) {
            return Ok(Deletion::Cancelled);
        }

        project_ops::remove_project(&mut self.projects, name)?;
        let was_active = self.views.close_if_active(name);
        self.persist();
        self.emit(Change::ProjectDeleted(name.to_string()));
        if was_active {
            self.emit(Change::ViewChanged(self.views.view()));
        }
        Ok(Deletion::Deleted)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Make `name` the active project and show its board.
    pub fn open_project(&mut self, name: &str) -> Result<(), BoardError> {
        self.get_project(name)?;
        self.views.open(name.to_string());
        self.emit(Change::ViewChanged(View::Tasks));
        Ok(())
    }

    pub fn navigate(&mut self, target: View) -> Result<View, BoardError> {
        let before = self.views.view();
        let result = self.views.navigate(target);
        if self.views.view() != before {
            self.emit(Change::ViewChanged(self.views.view()));
        }
        result
    }

    // -----------------------------------------------------------------------
    // Tasks (active project)
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, name: &str, desc: &str) -> Result<String, BoardError> {
        let (project, tasks) = self.active_project_mut()?;
        let id = task_ops::add_task(tasks, name, desc)?;
        self.tasks_changed(project);
        Ok(id)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task, BoardError> {
        let (project, tasks) = self.active_project_mut()?;
        let task = task_ops::delete_task(tasks, id)?;
        self.tasks_changed(project);
        Ok(task)
    }

    pub fn move_task(&mut self, id: &str, status: TaskStatus, index: usize) -> Result<(), BoardError> {
        let (project, tasks) = self.active_project_mut()?;
        task_ops::move_task(tasks, id, status, index)?;
        self.tasks_changed(project);
        Ok(())
    }

    /// Adopt a layout produced by the view (drag-and-drop, keyboard
    /// reordering, anything else) as the new task order.
    pub fn reconcile_from_view(&mut self, columns: &BoardColumns) -> Result<(), BoardError> {
        let (project, tasks) = self.active_project_mut()?;
        task_ops::reconcile(tasks, columns);
        self.tasks_changed(project);
        Ok(())
    }

    /// Current layout of the open project's board
    pub fn board(&self) -> Result<BoardColumns, BoardError> {
        self.views
            .active_project()
            .ok_or(BoardError::NoActiveProject)?;
        Ok(BoardColumns::from_tasks(self.active_tasks()))
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    pub fn progress(&self, name: &str) -> Result<u8, BoardError> {
        Ok(progress(&self.get_project(name)?.tasks))
    }

    /// Column counts for the open project (all zero if none is open)
    pub fn active_counts(&self) -> StatusCounts {
        status_counts(self.active_tasks())
    }

    pub fn report(&self) -> Report {
        aggregate(&self.projects)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            projects: &self.projects,
            view: self.views.view(),
            active_project: self.views.active_project(),
            active_tasks: self.active_tasks(),
            report: self.report(),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn active_project_mut(&mut self) -> Result<(String, &mut Project), BoardError> {
        let name = self
            .views
            .active_project()
            .ok_or(BoardError::NoActiveProject)?
            .to_string();
        let project = project_ops::get_project_mut(&mut self.projects, &name)?;
        Ok((name, project))
    }

    fn tasks_changed(&mut self, project: String) {
        self.persist();
        self.emit(Change::TasksChanged { project });
    }

    fn load_namespace(&mut self) {
        match load_projects(&mut self.store, self.user.as_deref()) {
            Ok(projects) => {
                tracing::debug!(user = ?self.user, count = projects.len(), "loaded projects");
                self.projects = projects;
            }
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable, continuing in memory");
                self.projects = ProjectMap::new();
                self.degraded = true;
                self.emit(Change::StorageUnavailable(e.to_string()));
            }
        }
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        if let Err(e) = save_projects(&mut self.store, self.user.as_deref(), &self.projects) {
            tracing::warn!(error = %e, "save failed, continuing in memory");
            self.degraded = true;
            self.emit(Change::StorageUnavailable(e.to_string()));
        }
    }

    fn emit(&mut self, change: Change) {
        if self.subscribers.is_empty() {
            return;
        }
        let mut subscribers = std::mem::take(&mut self.subscribers);
        {
            let snapshot = self.snapshot();
            for subscriber in subscribers.iter_mut() {
                subscriber.on_change(&change, &snapshot);
            }
        }
        self.subscribers = subscribers;
    }
}
