use crate::model::project::{Project, ProjectMap};

use super::{BoardError, validate_name};

/// Insert a new, empty project. Returns the stored (trimmed) name.
///
/// Names are matched exactly and case-sensitively.
pub fn create_project(
    projects: &mut ProjectMap,
    name: &str,
    deadline: Option<&str>,
) -> Result<String, BoardError> {
    let name = validate_name("project", name)?;
    if projects.contains_key(&name) {
        return Err(BoardError::DuplicateName(name));
    }
    projects.insert(name.clone(), Project::new(deadline));
    Ok(name)
}

/// Remove a project and all of its tasks, keeping the order of the rest.
pub fn remove_project(projects: &mut ProjectMap, name: &str) -> Result<Project, BoardError> {
    projects
        .shift_remove(name)
        .ok_or_else(|| BoardError::project_not_found(name))
}

pub fn get_project<'a>(projects: &'a ProjectMap, name: &str) -> Result<&'a Project, BoardError> {
    projects
        .get(name)
        .ok_or_else(|| BoardError::project_not_found(name))
}

pub fn get_project_mut<'a>(
    projects: &'a mut ProjectMap,
    name: &str,
) -> Result<&'a mut Project, BoardError> {
    projects
        .get_mut(name)
        .ok_or_else(|| BoardError::project_not_found(name))
}
