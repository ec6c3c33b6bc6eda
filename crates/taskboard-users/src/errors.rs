//! User directory error types.
//!
//! Login failures collapse into [`UserError::InvalidCredentials`] whatever
//! part of the email/password/role triple was wrong.

use taskboard_core::Role;
use taskboard_store::StoreError;
use thiserror::Error;

/// Errors from user and session operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// A required field is missing or malformed.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Form field name.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Registration with an email that is already taken.
    #[error("a user with email {0} already exists")]
    DuplicateUser(String),

    /// Login mismatch.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account with this email.
    #[error("User not found: {0}")]
    NotFound(String),

    /// No one is signed in.
    #[error("not signed in")]
    NotAuthenticated,

    /// Signed in without the required role.
    #[error("{required} role required")]
    NotAuthorized {
        /// Role the action needs.
        required: Role,
    },

    /// Storage failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl UserError {
    /// Create a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
