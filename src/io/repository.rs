//! Maps a user namespace to its storage key and moves the whole project
//! map in and out of a [`KeyValueStore`].

use crate::model::project::ProjectMap;

use super::store::{KeyValueStore, StoreError};

/// Key of the shared namespace used when no user is signed in
pub const DEFAULT_KEY: &str = "projectsData";

/// Storage key for a namespace. No user (or a blank one) maps to
/// [`DEFAULT_KEY`]; anyone else gets `projectsData_<uid>`.
pub fn storage_key(user: Option<&str>) -> String {
    match user {
        Some(uid) if !uid.is_empty() => format!("{}_{}", DEFAULT_KEY, uid),
        _ => DEFAULT_KEY.to_string(),
    }
}

/// Load a namespace's projects.
///
/// Missing data loads as an empty map. So does malformed data, which is
/// first copied aside under [`backup_key`] so the next save cannot destroy
/// it. Only a failing store is reported as an error.
pub fn load_projects<S: KeyValueStore + ?Sized>(
    store: &mut S,
    user: Option<&str>,
) -> Result<ProjectMap, StoreError> {
    let key = storage_key(user);
    let Some(raw) = store.get(&key)? else {
        return Ok(ProjectMap::new());
    };

    match serde_json::from_str::<Option<ProjectMap>>(&raw) {
        Ok(projects) => Ok(projects.unwrap_or_default()),
        Err(e) => {
            tracing::warn!(%key, error = %e, "stored projects are malformed, starting empty");
            back_up_malformed(store, &key, &raw);
            Ok(ProjectMap::new())
        }
    }
}

/// Key holding a copy of malformed data: `<key>.corrupt-<content hash>`
pub fn backup_key(key: &str, raw: &str) -> String {
    let hash = blake3::hash(raw.as_bytes()).to_hex();
    format!("{}.corrupt-{}", key, &hash.as_str()[..16])
}

/// Copy `raw` aside unless the same content was already backed up.
fn back_up_malformed<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, raw: &str) {
    let backup = backup_key(key, raw);
    match store.get(&backup) {
        Ok(Some(_)) => {
            tracing::debug!(%key, %backup, "malformed projects already backed up");
        }
        Ok(None) => match store.set(&backup, raw) {
            Ok(()) => tracing::warn!(%key, %backup, "backed up malformed projects"),
            Err(e) => tracing::warn!(%key, error = %e, "could not back up malformed projects"),
        },
        Err(e) => tracing::warn!(%key, error = %e, "could not check for a previous backup"),
    }
}

/// Replace a namespace's stored projects with `projects`.
pub fn save_projects<S: KeyValueStore + ?Sized>(
    store: &mut S,
    user: Option<&str>,
    projects: &ProjectMap,
) -> Result<(), StoreError> {
    let content = serde_json::to_string(projects)?;
    store.set(&storage_key(user), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::project::Project;
    use crate::model::task::{Task, TaskStatus};

    fn sample() -> ProjectMap {
        let mut map = ProjectMap::new();
        let mut alpha = Project::new(Some("2026-11-01"));
        alpha.tasks.push(Task {
            id: "t1".into(),
            name: "Write spec".into(),
            desc: "first draft".into(),
            status: TaskStatus::InProgress,
        });
        map.insert("Alpha".into(), alpha);
        map.insert("Beta".into(), Project::new(None));
        map
    }

    #[test]
    fn key_derivation() {
        assert_eq!(storage_key(None), "projectsData");
        assert_eq!(storage_key(Some("")), "projectsData");
        assert_eq!(storage_key(Some("u42")), "projectsData_u42");
        assert_ne!(storage_key(Some("u42")), storage_key(None));
    }

    #[test]
    fn save_then_load_is_identical() {
        let mut store = MemoryStore::new();
        let map = sample();
        save_projects(&mut store, Some("u1"), &map).unwrap();
        let loaded = load_projects(&mut store, Some("u1")).unwrap();
        assert_eq!(loaded, map);
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["Alpha", "Beta"],
            "project order survives"
        );
    }

    #[test]
    fn namespaces_do_not_leak() {
        let mut store = MemoryStore::new();
        save_projects(&mut store, Some("u1"), &sample()).unwrap();
        assert!(load_projects(&mut store, Some("u2")).unwrap().is_empty());
        assert!(load_projects(&mut store, None).unwrap().is_empty());
    }

    #[test]
    fn missing_and_null_load_empty() {
        let mut store = MemoryStore::new();
        assert!(load_projects(&mut store, None).unwrap().is_empty());
        store.set("projectsData", "null").unwrap();
        assert!(load_projects(&mut store, None).unwrap().is_empty());
        assert_eq!(store.keys().count(), 1, "null is not treated as corrupt");
    }

    #[test]
    fn malformed_loads_empty_and_is_backed_up() {
        let mut store = MemoryStore::new();
        store.set("projectsData_u1", "not json {{{").unwrap();

        let loaded = load_projects(&mut store, Some("u1")).unwrap();
        assert!(loaded.is_empty());

        let backup = store
            .keys()
            .find(|k| k.starts_with("projectsData_u1.corrupt-"))
            .map(str::to_string)
            .expect("backup written");
        assert_eq!(backup, backup_key("projectsData_u1", "not json {{{"));
        assert_eq!(store.get(&backup).unwrap().as_deref(), Some("not json {{{"));
    }

    #[test]
    fn repeated_loads_back_up_once() {
        let mut store = MemoryStore::new();
        store.set("projectsData", "{ not json").unwrap();
        for _ in 0..3 {
            assert!(load_projects(&mut store, None).unwrap().is_empty());
        }
        let backups = store.keys().filter(|k| k.contains(".corrupt-")).count();
        assert_eq!(backups, 1);

        // A different corruption gets its own copy
        store.set("projectsData", "[1, 2").unwrap();
        load_projects(&mut store, None).unwrap();
        let backups = store.keys().filter(|k| k.contains(".corrupt-")).count();
        assert_eq!(backups, 2);
    }

    #[test]
    fn legacy_records_fill_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(
                "projectsData",
                r#"{"Old":{"tasks":[{"id":"1","name":"x","status":"done"}]},"Bare":{}}"#,
            )
            .unwrap();
        let loaded = load_projects(&mut store, None).unwrap();
        assert_eq!(loaded["Old"].deadline, "N/A");
        assert_eq!(loaded["Old"].tasks[0].desc, "");
        assert!(loaded["Bare"].tasks.is_empty());
    }

    #[test]
    fn persisted_shape_matches_layout() {
        let mut store = MemoryStore::new();
        save_projects(&mut store, None, &sample()).unwrap();
        let raw = store.get("projectsData").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Alpha"]["deadline"], "2026-11-01");
        assert_eq!(value["Alpha"]["tasks"][0]["id"], "t1");
        assert_eq!(value["Alpha"]["tasks"][0]["status"], "inprogress");
        assert_eq!(value["Beta"]["deadline"], "N/A");
        assert_eq!(value["Beta"]["tasks"], serde_json::json!([]));
    }
}
