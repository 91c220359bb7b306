//! Key-value persistence for tickets and session data.
//!
//! Values are JSON documents stored under fixed keys. [`FileStore`] keeps one
//! `<key>.json` file per key and writes via temp file + rename.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, TicketError};

/// Fixed keys used by the dashboard.
pub mod keys {
    /// Boolean login flag.
    pub const LOGIN_FLAG: &str = "isLoggedIn";
    /// Signed-in user profile.
    pub const USER: &str = "user";
    /// The whole ticket collection.
    pub const TICKETS: &str = "tickets";
    /// Raw copy of a ticket collection that failed to decode.
    pub const CORRUPT_TICKETS: &str = "tickets.corrupt";
}

/// Raw string key-value store.
pub trait KeyValueStore {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Process-local store, used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the key contains path-unsafe characters.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(TicketError::Storage(format!("invalid key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TicketError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TicketError::Io(e)),
        }
    }
}

/// Typed JSON adapter over a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load and decode the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `Corrupt` if the stored value does not decode as `T`,
    /// or the store's own error if it cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| TicketError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Load the raw JSON text under `key`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub fn load_raw(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    /// Encode `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `Json` on encoding failure or the store's write error.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        debug!(key, bytes = json.len(), "saving value");
        self.store.set(key, &json)
    }

    /// Store raw JSON text under `key`.
    ///
    /// # Errors
    ///
    /// Returns the store's write error.
    pub fn save_raw(&mut self, key: &str, raw: &str) -> Result<()> {
        self.store.set(key, raw)
    }

    /// Remove every key in `keys`.
    ///
    /// # Errors
    ///
    /// Returns the first removal error.
    pub fn clear(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
