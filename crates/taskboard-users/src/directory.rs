//! Registered accounts.
//!
//! Emails are compared after trimming and lower-casing, both for uniqueness
//! at registration and for lookups. Removing a user leaves tasks assigned to
//! that email in place.

use taskboard_core::{Email, EmailError, Role, User, normalize_email};
use taskboard_store::BoardStore;
use tracing::{debug, info, warn};

use crate::errors::UserError;
use crate::password::{PasswordHasher, constant_time_eq, is_hashed};

/// Demo logins, registered by [`UserDirectory::seed_demo_accounts`].
pub const DEMO_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin@gmail.com", "admin123", Role::Admin),
    ("user@gmail.com", "user123", Role::User),
];

/// User directory over a [`BoardStore`].
pub struct UserDirectory<'a> {
    store: &'a BoardStore,
    hasher: PasswordHasher,
}

impl<'a> UserDirectory<'a> {
    /// Directory hashing with [`PasswordHasher::default`].
    pub fn new(store: &'a BoardStore) -> Self {
        Self::with_hasher(store, PasswordHasher::default())
    }

    /// Directory hashing new passwords with `hasher`.
    pub fn with_hasher(store: &'a BoardStore, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// The underlying store.
    pub fn store(&self) -> &'a BoardStore {
        self.store
    }

    /// Register a new account.
    ///
    /// The email is normalized before the uniqueness check and the password is
    /// trimmed, then hashed.
    pub fn register(&self, email: &str, password: &str, role: Role) -> Result<User, UserError> {
        let email = parse_email(email)?;
        let password = password.trim();
        if password.is_empty() {
            return Err(UserError::validation("password", "password is required"));
        }

        let mut users = self.store.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(UserError::DuplicateUser(email.to_string()));
        }

        let user = User {
            email,
            password: self.hasher.hash(password),
            role,
        };
        users.push(user.clone());
        self.store.put_users(&users)?;

        info!(email = %user.email, role = %user.role, "registered user");
        Ok(user)
    }

    /// Check an email/password/role triple.
    ///
    /// Legacy plaintext passwords are compared verbatim and replaced with a
    /// hash once they match.
    pub fn authenticate(&self, email: &str, password: &str, role: Role) -> Result<User, UserError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(UserError::validation("email", "email is required"));
        }
        let password = password.trim();
        if password.is_empty() {
            return Err(UserError::validation("password", "password is required"));
        }

        let mut users = self.store.users()?;
        let Some(index) = users
            .iter()
            .position(|u| u.email.as_str() == email && u.role == role)
        else {
            warn!(%email, %role, "login rejected");
            return Err(UserError::InvalidCredentials);
        };

        let stored = &users[index].password;
        if is_hashed(stored) {
            if !PasswordHasher::verify(stored, password) {
                warn!(%email, %role, "login rejected");
                return Err(UserError::InvalidCredentials);
            }
        } else {
            if !constant_time_eq(stored.as_bytes(), password.as_bytes()) {
                warn!(%email, %role, "login rejected");
                return Err(UserError::InvalidCredentials);
            }
            users[index].password = self.hasher.hash(password);
            self.store.put_users(&users)?;
            info!(%email, "upgraded plaintext password to hash");
        }

        debug!(%email, %role, "authenticated");
        Ok(users.swap_remove(index))
    }

    /// Change the role of an existing account.
    pub fn update_role(&self, email: &str, role: Role) -> Result<User, UserError> {
        let key = normalize_email(email);
        let mut users = self.store.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.email.as_str() == key)
            .ok_or_else(|| UserError::NotFound(key.clone()))?;
        user.role = role;
        let updated = user.clone();
        self.store.put_users(&users)?;

        info!(email = %updated.email, %role, "updated role");
        Ok(updated)
    }

    /// Remove an account. Returns `false` if no account matched.
    pub fn remove(&self, email: &str) -> Result<bool, UserError> {
        let key = normalize_email(email);
        let mut users = self.store.users()?;
        let before = users.len();
        users.retain(|u| u.email.as_str() != key);
        if users.len() == before {
            return Ok(false);
        }
        self.store.put_users(&users)?;

        info!(email = %key, "removed user");
        Ok(true)
    }

    /// Accounts in registration order, optionally limited to one role.
    pub fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserError> {
        let mut users = self.store.users()?;
        if let Some(role) = role {
            users.retain(|u| u.role == role);
        }
        Ok(users)
    }

    /// Look up an account by email.
    pub fn find(&self, email: &str) -> Result<Option<User>, UserError> {
        let key = normalize_email(email);
        Ok(self
            .store
            .users()?
            .into_iter()
            .find(|u| u.email.as_str() == key))
    }

    /// Register the [`DEMO_ACCOUNTS`] that are missing. Returns how many were added.
    pub fn seed_demo_accounts(&self) -> Result<usize, UserError> {
        let mut added = 0;
        for (email, password, role) in DEMO_ACCOUNTS {
            if self.find(email)?.is_none() {
                let _ = self.register(email, password, role)?;
                added += 1;
            }
        }
        if added > 0 {
            info!(added, "seeded demo accounts");
        }
        Ok(added)
    }
}

fn parse_email(raw: &str) -> Result<Email, UserError> {
    Email::parse(raw).map_err(|e| match e {
        EmailError::Empty => UserError::validation("email", "email is required"),
        EmailError::Malformed(_) => UserError::validation("email", e.to_string()),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
