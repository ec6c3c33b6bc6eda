//! # taskboard-core
//!
//! Foundation types and utilities shared by every Taskboard crate.
//!
//! - **Emails**: [`Email`] newtype that is always trimmed and lower-cased,
//!   plus [`emails_match`] for comparing soft references
//! - **Records**: [`User`], [`Role`], [`Task`], [`TaskStatus`] with the
//!   persisted JSON field names
//! - **Task IDs**: [`TaskId`] and the monotonic [`TaskIdGenerator`]
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` subscriber

#![deny(unsafe_code)]

pub mod email;
pub mod ids;
pub mod logging;
pub mod types;

pub use email::{Email, EmailError, emails_match, normalize_email};
pub use ids::{TaskId, TaskIdGenerator};
pub use types::{ParseRoleError, ParseStatusError, Role, Task, TaskStatus, User};
