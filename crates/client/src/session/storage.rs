//! Key/value backends for the session store.
//!
//! Backends hold plain strings under fixed keys, the same model as browser
//! local storage. [`FileStorage`] persists to a JSON file, [`MemoryStorage`]
//! keeps everything in process, and [`UnavailableStorage`] stands in for a
//! context that has no storage at all.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use super::SessionError;

/// String key/value storage backing a [`super::SessionStore`].
pub trait SessionStorage: Send + Sync {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Session storage in a JSON object file.
///
/// A missing file is an empty store. Writes replace the file atomically via
/// a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a file-backed store. Nothing is touched on disk until the first
    /// write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                SessionError::Corrupt(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }

    /// Load for a read-modify-write. A corrupt file is replaced rather than
    /// blocking a fresh login.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match self.load() {
            Err(SessionError::Corrupt(reason)) => {
                warn!(%reason, "Discarding unreadable session file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Io(e)),
            };
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_vec_pretty(entries)
            .map_err(|e| SessionError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = open_private(&tmp)?;
        file.write_all(&contents)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Session file written");
        Ok(())
    }
}

/// Open a file readable only by the current user; it holds a bearer token.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

impl SessionStorage for FileStorage {
    /// An unparsable file reads as unavailable storage, not as corrupt data.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Unavailable)?;
        match self.load() {
            Ok(mut entries) => Ok(entries.remove(key)),
            Err(SessionError::Corrupt(reason)) => {
                warn!(%reason, "Unreadable session file");
                Err(SessionError::Unavailable)
            }
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Unavailable)?;
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Unavailable)?;
        let mut entries = self.load_for_write()?;
        entries.remove(key);
        self.persist(&entries)
    }
}

/// In-process session storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.read().map_err(|_| SessionError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::Unavailable)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}

/// Storage for a context that has none. Reads fail (and the session store
/// treats that as "no session"); writes fail; removals are no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
        Err(SessionError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), SessionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("session.json"));
        assert_eq!(storage.get("token").expect("readable"), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path).set("token", "abc").expect("write");

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("token").expect("read").as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_storage_removing_last_key_deletes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);

        storage.set("token", "abc").expect("write");
        assert!(path.exists());
        storage.remove("token").expect("remove");
        assert!(!path.exists());
        storage.remove("token").expect("remove again");
    }

    #[test]
    fn test_file_storage_corrupt_file_is_unavailable_and_replaced_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").expect("seed");
        let storage = FileStorage::new(&path);

        assert!(matches!(storage.get("token"), Err(SessionError::Unavailable)));

        storage.set("token", "fresh").expect("write over corrupt file");
        assert_eq!(storage.get("token").expect("read").as_deref(), Some("fresh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        FileStorage::new(&path).set("token", "abc").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("user", "x").expect("write");
        assert_eq!(storage.get("user").expect("read").as_deref(), Some("x"));
        storage.remove("user").expect("remove");
        assert_eq!(storage.get("user").expect("read"), None);
    }

    #[test]
    fn test_unavailable_storage() {
        let storage = UnavailableStorage;
        assert!(matches!(storage.get("token"), Err(SessionError::Unavailable)));
        assert!(matches!(
            storage.set("token", "x"),
            Err(SessionError::Unavailable)
        ));
        assert!(storage.remove("token").is_ok());
    }
}
