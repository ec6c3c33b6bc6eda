//! # taskboard-tasks
//!
//! Task assignment and the status state machine.
//!
//! Admins assign tasks to an email; the assignee completes them. The
//! assignee reference is a plain email string, so tasks outlive the removal
//! of their user.

#![deny(unsafe_code)]

pub mod directory;
pub mod errors;

pub use directory::{AssignParams, TaskDirectory};
pub use errors::TaskError;
