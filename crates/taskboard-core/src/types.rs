//! Persisted record types.
//!
//! Field names and enum spellings are part of the stored format
//! (`assignedTo`, `createdAt`, `"In Progress"`) and must not change, or
//! existing data directories stop loading.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email::{Email, emails_match};
use crate::ids::TaskId;

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Assigns tasks and manages users.
    Admin,
    /// Receives tasks and appears on the leaderboard.
    User,
}

impl Role {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unrecognized role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0} (expected admin or user)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Task status.
///
/// `Pending → InProgress` only happens when an admin assigns a task as
/// in progress. The assignee moves a task to `Completed`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Assigned, not started.
    Pending,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Whether no transition leaves this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unrecognized status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0} (expected pending, in-progress or completed)")]
pub struct ParseStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A registered account.
///
/// `password` holds the encoded hash produced by the user directory. Older
/// records may hold plaintext; they are upgraded on the next successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, normalized key.
    pub email: Email,
    /// Encoded password hash (or legacy plaintext).
    pub password: String,
    /// Account role.
    pub role: Role,
}

impl User {
    /// Whether this account has `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// An assigned unit of work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// Assignee email. A soft reference: it may name no registered user.
    pub assigned_to: String,
    /// Current status.
    pub status: TaskStatus,
    /// UTC creation date, serialized as `YYYY-MM-DD`.
    pub created_at: NaiveDate,
}

impl Task {
    /// Whether `email` is this task's assignee (case- and whitespace-insensitive).
    #[must_use]
    pub fn is_assigned_to(&self, email: &str) -> bool {
        emails_match(&self.assigned_to, email)
    }

    /// Whether this task is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
