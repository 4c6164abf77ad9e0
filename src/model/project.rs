use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskStatus};

/// Deadline label used when none was given
pub const NO_DEADLINE: &str = "N/A";

/// All projects of one namespace, keyed by name, in creation order
pub type ProjectMap = IndexMap<String, Project>;

/// A named container of tasks. The name lives in the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "default_deadline")]
    pub deadline: String,
    /// Ordered task sequence; order within a status is the board order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

fn default_deadline() -> String {
    NO_DEADLINE.to_string()
}

impl Project {
    /// Create an empty project. A blank deadline becomes `N/A`; anything
    /// else is kept as typed.
    pub fn new(deadline: Option<&str>) -> Self {
        let deadline = match deadline {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => default_deadline(),
        };
        Project {
            deadline,
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in one column, in board order
    pub fn tasks_with_status(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_deadline_becomes_na() {
        assert_eq!(Project::new(None).deadline, "N/A");
        assert_eq!(Project::new(Some("   ")).deadline, "N/A");
        assert_eq!(Project::new(Some("2026-12-01")).deadline, "2026-12-01");
    }

    #[test]
    fn deadline_kept_verbatim() {
        assert_eq!(Project::new(Some(" end of Q3 ")).deadline, " end of Q3 ");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let project: Project = serde_json::from_str("{}").unwrap();
        assert_eq!(project.deadline, "N/A");
        assert!(project.tasks.is_empty());
    }
}
