pub mod progress;
pub mod project_ops;
pub mod report;
pub mod task_ops;

/// Error type for board operations.
///
/// Every variant is raised before any state is touched, so a failed
/// operation leaves the project map exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{0} name must not be empty")]
    InvalidName(&'static str),
    #[error("a project named '{0}' already exists")]
    DuplicateName(String),
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },
    #[error("open a project first")]
    NoActiveProject,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl BoardError {
    pub(crate) fn project_not_found(name: &str) -> Self {
        BoardError::NotFound {
            kind: "project",
            key: name.to_string(),
        }
    }

    pub(crate) fn task_not_found(id: &str) -> Self {
        BoardError::NotFound {
            kind: "task",
            key: id.to_string(),
        }
    }
}

/// Trim user input, rejecting blank names
pub(crate) fn validate_name(kind: &'static str, raw: &str) -> Result<String, BoardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardError::InvalidName(kind));
    }
    Ok(trimmed.to_string())
}
