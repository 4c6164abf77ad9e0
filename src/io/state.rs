use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::view::View;

use super::store::atomic_write;

const SESSION_FILE: &str = ".state.json";

/// Session pointers persisted between runs (written to .state.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user; absent means the shared namespace
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub active_project: Option<String>,
}

/// Read .state.json from the data directory
pub fn read_session(data_dir: &Path) -> Option<Session> {
    let content = fs::read_to_string(data_dir.join(SESSION_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_session(data_dir: &Path, session: &Session) -> Result<(), std::io::Error> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(session)?;
    atomic_write(&data_dir.join(SESSION_FILE), content.as_bytes())
}
