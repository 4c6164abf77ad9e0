use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for key-value store access
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {key}: {source}")]
    Read { key: String, source: io::Error },
    #[error("could not write {key}: {source}")]
    Write { key: String, source: io::Error },
    #[error("could not encode projects: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for crate::ops::BoardError {
    fn from(e: StoreError) -> Self {
        crate::ops::BoardError::StorageUnavailable(e.to_string())
    }
}

/// Durable string storage addressed by key.
///
/// `set` replaces the whole value; readers never observe a partial write.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` are
    /// percent-encoded so user ids cannot escape the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            atomic_write(&self.path_for(key), value.as_bytes())
        };
        write().map_err(|e| StoreError::Write {
            key: key.to_string(),
            source: e,
        })
    }
}

/// Write via a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(b as char),
            // A leading dot would make a hidden file; `..` would be a path
            b'.' if !out.is_empty() => out.push('.'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Non-durable store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("data"));
        assert_eq!(store.get("projectsData").unwrap(), None);

        store.set("projectsData", "{}").unwrap();
        assert_eq!(store.get("projectsData").unwrap().as_deref(), Some("{}"));
        assert!(tmp.path().join("data/projectsData.json").exists());

        store.set("projectsData", r#"{"A":{}}"#).unwrap();
        assert_eq!(
            store.get("projectsData").unwrap().as_deref(),
            Some(r#"{"A":{}}"#)
        );
    }

    #[test]
    fn keys_are_encoded_into_file_names() {
        let store = FileStore::new("/data");
        assert_eq!(
            store.path_for("projectsData_u-1"),
            PathBuf::from("/data/projectsData_u-1.json")
        );
        assert_eq!(
            store.path_for("projectsData_../x"),
            PathBuf::from("/data/projectsData_..%2Fx.json")
        );
        assert_eq!(store.path_for(".hidden"), PathBuf::from("/data/%2Ehidden.json"));
    }

    #[test]
    fn file_store_read_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        // A directory where the file should be cannot be read as a string
        fs::create_dir_all(store.path_for("projectsData")).unwrap();
        assert!(matches!(
            store.get("projectsData"),
            Err(StoreError::Read { .. })
        ));
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["k"]);
    }
}
