use serde::{Deserialize, Serialize};

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Column order on the board: todo → inprogress → done
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// The persisted spelling (`todo`, `inprogress`, `done`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        }
    }

    /// Human label for column headers
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "inprogress" | "in-progress" | "doing" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!(
                "invalid status '{}' (expected todo, inprogress, done)",
                s
            )),
        }
    }
}

/// A unit of work on a project board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, assigned at creation
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub status: TaskStatus,
}

impl Task {
    /// Create a `todo` task with a fresh id
    pub fn new(name: String, desc: String) -> Self {
        Task {
            id: new_task_id(),
            name,
            desc,
            status: TaskStatus::Todo,
        }
    }
}

/// Generate a collision-resistant task id (random v4 UUID, simple form)
pub fn new_task_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
