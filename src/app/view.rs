use serde::{Deserialize, Serialize};

use crate::ops::BoardError;

/// Which of the three screens is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Projects,
    Tasks,
    Reports,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Projects => "Projects",
            View::Tasks => "Tasks",
            View::Reports => "Reports",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Projects => write!(f, "projects"),
            View::Tasks => write!(f, "tasks"),
            View::Reports => write!(f, "reports"),
        }
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "projects" => Ok(View::Projects),
            "tasks" | "board" => Ok(View::Tasks),
            "reports" => Ok(View::Reports),
            _ => Err(format!(
                "invalid view '{}' (expected projects, tasks, reports)",
                s
            )),
        }
    }
}

/// Active view and active project pointers.
///
/// The only guarded transition is into `Tasks`, which needs an open project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCoordinator {
    view: View,
    active_project: Option<String>,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved pointers. `Tasks` without a project falls back
    /// to `Projects`.
    pub fn restore(view: View, active_project: Option<String>) -> Self {
        let view = if view == View::Tasks && active_project.is_none() {
            View::Projects
        } else {
            view
        };
        ViewCoordinator {
            view,
            active_project,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_project(&self) -> Option<&str> {
        self.active_project.as_deref()
    }

    /// Switch views. Asking for `Tasks` with nothing open lands on
    /// `Projects` and reports `NoActiveProject`.
    pub fn navigate(&mut self, target: View) -> Result<View, BoardError> {
        if target == View::Tasks && self.active_project.is_none() {
            self.view = View::Projects;
            return Err(BoardError::NoActiveProject);
        }
        self.view = target;
        Ok(target)
    }

    /// Open a project: it becomes active and the task board shows.
    pub fn open(&mut self, project: String) {
        self.active_project = Some(project);
        self.view = View::Tasks;
    }

    /// Forget `project` if it is the active one. Returns whether it was.
    pub fn close_if_active(&mut self, project: &str) -> bool {
        if self.active_project.as_deref() != Some(project) {
            return false;
        }
        self.active_project = None;
        if self.view == View::Tasks {
            self.view = View::Projects;
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_projects() {
        let views = ViewCoordinator::new();
        assert_eq!(views.view(), View::Projects);
        assert_eq!(views.active_project(), None);
    }

    #[test]
    fn tasks_without_project_is_rejected() {
        let mut views = ViewCoordinator::new();
        assert_eq!(views.navigate(View::Tasks), Err(BoardError::NoActiveProject));
        assert_eq!(views.view(), View::Projects);
    }

    #[test]
    fn tasks_without_project_falls_back_from_reports() {
        let mut views = ViewCoordinator::new();
        views.navigate(View::Reports).unwrap();
        assert!(views.navigate(View::Tasks).is_err());
        assert_eq!(views.view(), View::Projects);
    }

    #[test]
    fn open_sets_active_and_shows_tasks() {
        let mut views = ViewCoordinator::new();
        views.open("Alpha".into());
        assert_eq!(views.view(), View::Tasks);
        assert_eq!(views.active_project(), Some("Alpha"));

        // Plain navigation never touches the active project
        views.navigate(View::Reports).unwrap();
        assert_eq!(views.active_project(), Some("Alpha"));
        assert_eq!(views.navigate(View::Tasks), Ok(View::Tasks));
    }

    #[test]
    fn closing_active_project() {
        let mut views = ViewCoordinator::new();
        views.open("Alpha".into());
        assert!(!views.close_if_active("Beta"));
        assert_eq!(views.active_project(), Some("Alpha"));
        assert!(views.close_if_active("Alpha"));
        assert_eq!(views.active_project(), None);
        assert_eq!(views.view(), View::Projects);
    }

    #[test]
    fn restore_guards_tasks_view() {
        let views = ViewCoordinator::restore(View::Tasks, None);
        assert_eq!(views.view(), View::Projects);
        let views = ViewCoordinator::restore(View::Reports, Some("A".into()));
        assert_eq!(views.view(), View::Reports);
        assert_eq!(views.active_project(), Some("A"));
    }

    #[test]
    fn parse_view_names() {
        assert_eq!("Reports".parse::<View>(), Ok(View::Reports));
        assert_eq!("board".parse::<View>(), Ok(View::Tasks));
        assert!("settings".parse::<View>().is_err());
        assert_eq!(View::Tasks.to_string(), "tasks");
    }
}
