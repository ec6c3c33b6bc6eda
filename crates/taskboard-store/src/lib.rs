//! # taskboard-store
//!
//! Persistence for the three Taskboard keys:
//!
//! | key     | value                                        |
//! |---------|----------------------------------------------|
//! | `users` | array of `{email, password, role}`           |
//! | `tasks` | array of `{id, title, description, assignedTo, status, createdAt}` |
//! | `user`  | the signed-in user record, absent when signed out |
//!
//! [`BoardStore`] is the only way the directories reach these keys. It sits
//! on a [`StorageBackend`]: [`FileBackend`] keeps one JSON file per key in a
//! data directory, [`MemoryBackend`] keeps them in process.
//!
//! # Concurrency
//!
//! Every mutation is a read-modify-write of a whole collection with no
//! locking across processes. Two processes sharing a data directory can
//! overwrite each other's changes: the last write wins and nothing detects
//! the conflict. Callers needing more must serialize access themselves.

#![deny(unsafe_code)]

pub mod backend;
pub mod errors;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use errors::StoreError;
pub use store::{BoardStore, SESSION_KEY, TASKS_KEY, USERS_KEY};
