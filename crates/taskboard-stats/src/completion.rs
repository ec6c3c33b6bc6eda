//! Per-user completion counts.

use serde::Serialize;
use taskboard_core::Task;

/// Number of completed tasks assigned to `email`.
pub fn completed_count_for(email: &str, tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.is_completed() && t.is_assigned_to(email))
        .count()
}

/// Assigned versus completed tasks for one user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Tasks assigned to the user.
    pub assigned: usize,
    /// Of those, how many are completed.
    pub completed: usize,
    /// `completed / assigned * 100`, or 0 with nothing assigned.
    pub percent: f64,
}

/// Progress of `email` across `tasks`.
#[allow(clippy::cast_precision_loss)]
pub fn user_progress(email: &str, tasks: &[Task]) -> UserProgress {
    let (assigned, completed) = tasks
        .iter()
        .filter(|t| t.is_assigned_to(email))
        .fold((0, 0), |(assigned, completed), t| {
            (assigned + 1, completed + usize::from(t.is_completed()))
        });
    let percent = if assigned == 0 {
        0.0
    } else {
        completed as f64 / assigned as f64 * 100.0
    };
    UserProgress {
        assigned,
        completed,
        percent,
    }
}
