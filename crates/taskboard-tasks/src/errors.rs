//! Task error types.

use taskboard_core::{TaskId, TaskStatus};
use taskboard_store::StoreError;
use thiserror::Error;

/// Errors from task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No task with this ID.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// Someone other than the assignee tried to change the task.
    #[error("{email} is not the assignee of task {task_id}")]
    NotAuthorized {
        /// The task.
        task_id: TaskId,
        /// Who asked.
        email: String,
    },

    /// Transition not allowed by the status state machine.
    #[error("cannot move task from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// Storage failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
