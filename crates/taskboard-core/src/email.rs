//! Email addresses as case-insensitive keys.
//!
//! Users are keyed by email and tasks point at their assignee by email, so
//! every comparison goes through [`normalize_email`]: surrounding whitespace
//! is trimmed and the address is lower-cased. [`Email`] holds an address that
//! has already been normalized.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trim surrounding whitespace and lower-case an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Compare two addresses the way the directories do.
pub fn emails_match(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

/// Why a string was rejected as an email address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// Nothing left after trimming.
    #[error("email is required")]
    Empty,
    /// Not of the form `local@domain`.
    #[error("invalid email address: {0}")]
    Malformed(String),
}

/// A normalized email address.
///
/// Deserialization normalizes but does not validate, so records written by
/// older clients with stray whitespace or capitals still load and compare
/// correctly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize and validate `raw`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let normalized = normalize_email(raw);
        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(EmailError::Malformed(normalized));
        };
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(EmailError::Malformed(normalized));
        }
        Ok(Self(normalized))
    }

    /// Return the address as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` names this address once normalized.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == normalize_email(other)
    }
}

impl From<String> for Email {
    fn from(s: String) -> Self {
        Self(normalize_email(&s))
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
