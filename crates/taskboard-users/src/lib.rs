//! # taskboard-users
//!
//! Accounts and sign-in for Taskboard.
//!
//! - [`UserDirectory`]: register, authenticate, edit roles, remove, list
//! - [`PasswordHasher`]: salted PBKDF2-HMAC-SHA256 password encoding
//! - [`Session`]: the signed-in user and the role gates built on it

#![deny(unsafe_code)]

pub mod directory;
pub mod errors;
pub mod password;
pub mod session;

pub use directory::{DEMO_ACCOUNTS, UserDirectory};
pub use errors::UserError;
pub use password::{DEFAULT_ITERATIONS, MAX_ITERATIONS, PasswordHasher, is_hashed};
pub use session::Session;
