//! Typed access to the persisted collections.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use taskboard_core::{Task, User};
use tracing::{debug, warn};

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::errors::StoreError;

/// Key holding the user collection.
pub const USERS_KEY: &str = "users";
/// Key holding the task collection.
pub const TASKS_KEY: &str = "tasks";
/// Key holding the signed-in user.
pub const SESSION_KEY: &str = "user";

/// Owner of the user, task and session keys.
///
/// Reads are parse-or-default: a missing key is an empty collection, and a
/// malformed one is logged and treated as empty. Writes replace the whole
/// value.
pub struct BoardStore {
    backend: Box<dyn StorageBackend>,
}

impl BoardStore {
    /// Wrap a backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by an in-process map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Store backed by JSON files in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(dir))
    }

    /// Direct access to the backend.
    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Collections
    // ─────────────────────────────────────────────────────────────────────

    /// All users in registration order.
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        self.load_collection(USERS_KEY)
    }

    /// Replace the user collection.
    pub fn put_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.save(USERS_KEY, users)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.load_collection(TASKS_KEY)
    }

    /// Replace the task collection.
    pub fn put_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(TASKS_KEY, tasks)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────

    /// The signed-in user, if any.
    pub fn session(&self) -> Result<Option<User>, StoreError> {
        match self.try_load::<User>(SESSION_KEY) {
            Ok(user) => Ok(user),
            Err(StoreError::Parse { key, source }) => {
                warn!(%key, error = %source, "discarding malformed session");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Record `user` as signed in.
    pub fn put_session(&self, user: &User) -> Result<(), StoreError> {
        self.save(SESSION_KEY, user)
    }

    /// Sign out.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.backend.remove(SESSION_KEY)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.try_load::<Vec<T>>(key) {
            Ok(items) => {
                let items = items.unwrap_or_default();
                debug!(key, count = items.len(), "loaded collection");
                Ok(items)
            }
            Err(StoreError::Parse { key, source }) => {
                warn!(%key, error = %source, "malformed collection, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        // a cleared value may have been written as `null`
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                key: key.to_string(),
                source,
            })
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.put(key, &json)
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
