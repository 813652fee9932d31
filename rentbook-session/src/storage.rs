//! Key/value storage backends.

use crate::error::SessionResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key/value store with `localStorage` semantics.
///
/// Values are opaque strings; callers decide how to encode them.
pub trait LocalStorage: Send + Sync {
    /// Get a value, `Ok(None)` if absent.
    fn get_item(&self, key: &str) -> SessionResult<Option<String>>;

    /// Insert or replace a value.
    fn set_item(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> SessionResult<()>;

    /// All stored keys.
    fn keys(&self) -> SessionResult<Vec<String>>;
}

/// Volatile storage, used in tests and for `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> SessionResult<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }
}

/// Storage persisted as a single JSON object on disk.
///
/// The whole file is rewritten on every mutation. A missing file is an
/// empty store; an unreadable or malformed one is treated as empty too and
/// replaced on the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = Self::load(&path);
        Self {
            path,
            items: RwLock::new(items),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                rentbook_log::warn!("Cannot read session store {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                rentbook_log::warn!("Ignoring malformed session store {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)?;
        write_private(&self.path, json.as_bytes())?;
        rentbook_log::trace!("Flushed {} session entries to {}", items.len(), self.path.display());
        Ok(())
    }
}

/// The store holds the bearer token, so on Unix it is readable by the owner only.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut items = self.items.write();
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        let mut items = self.items.write();
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.flush(&next)?;
        *items = next;
        Ok(())
    }

    fn keys(&self) -> SessionResult<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }
}
