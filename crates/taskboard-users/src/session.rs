//! The signed-in user.
//!
//! The session key stores a copy of the user record taken at login. The
//! role gates re-read the live record, so a role edit or account removal
//! takes effect without signing out.

use taskboard_core::{Role, User};
use tracing::info;

use crate::directory::UserDirectory;
use crate::errors::UserError;

/// Session operations backed by a [`UserDirectory`].
pub struct Session<'a> {
    directory: &'a UserDirectory<'a>,
}

impl<'a> Session<'a> {
    /// Session over `directory` and its store.
    pub fn new(directory: &'a UserDirectory<'a>) -> Self {
        Self { directory }
    }

    /// Authenticate and record the user as signed in.
    pub fn login(&self, email: &str, password: &str, role: Role) -> Result<User, UserError> {
        let user = self.directory.authenticate(email, password, role)?;
        self.directory.store().put_session(&user)?;
        info!(email = %user.email, role = %user.role, "signed in");
        Ok(user)
    }

    /// Sign out. Signing out twice is fine.
    pub fn logout(&self) -> Result<(), UserError> {
        self.directory.store().clear_session()?;
        info!("signed out");
        Ok(())
    }

    /// The user recorded at login, if any.
    pub fn current(&self) -> Result<Option<User>, UserError> {
        Ok(self.directory.store().session()?)
    }

    /// The live record of the signed-in user.
    ///
    /// A session whose account has since been removed is cleared and treated
    /// as signed out.
    pub fn require_user(&self) -> Result<User, UserError> {
        let Some(session) = self.current()? else {
            return Err(UserError::NotAuthenticated);
        };
        match self.directory.find(session.email.as_str())? {
            Some(user) => Ok(user),
            None => {
                self.directory.store().clear_session()?;
                info!(email = %session.email, "cleared session of removed account");
                Err(UserError::NotAuthenticated)
            }
        }
    }

    /// The signed-in user, provided they hold `role`.
    pub fn require_role(&self, role: Role) -> Result<User, UserError> {
        let user = self.require_user()?;
        if user.has_role(role) {
            Ok(user)
        } else {
            Err(UserError::NotAuthorized { required: role })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
