//! Task assignment, status changes, and listings.
//!
//! Key business rules:
//!
//! - **Soft assignee reference**: `assigned_to` is validated as an email when
//!   a task is assigned but is never checked against the user directory.
//! - **Any initial status**: an admin may record work that is already under
//!   way or done; the transition rules below apply only afterwards.
//! - **One-way completion**: the assignee may move `Pending` or `InProgress`
//!   to `Completed`. Completing a completed task changes nothing. No
//!   transition leaves `Completed`.
//! - **Unique IDs**: issued by [`TaskIdGenerator`], above every stored ID.

use chrono::{NaiveDate, Utc};
use taskboard_core::{Email, Task, TaskId, TaskIdGenerator, TaskStatus};
use taskboard_store::BoardStore;
use tracing::{debug, info};

use crate::errors::TaskError;

/// Input for [`TaskDirectory::assign`].
#[derive(Clone, Debug, Default)]
pub struct AssignParams {
    /// Short title (required).
    pub title: String,
    /// Free-form details.
    pub description: String,
    /// Assignee email.
    pub assigned_to: String,
    /// Initial status, `Pending` when `None`.
    pub status: Option<TaskStatus>,
}

/// Task directory over a [`BoardStore`].
pub struct TaskDirectory<'a> {
    store: &'a BoardStore,
    ids: TaskIdGenerator,
}

impl<'a> TaskDirectory<'a> {
    /// Directory over `store`.
    pub fn new(store: &'a BoardStore) -> Self {
        Self {
            store,
            ids: TaskIdGenerator::new(),
        }
    }

    /// Create a task dated today (UTC) and append it.
    pub fn assign(&self, params: &AssignParams) -> Result<Task, TaskError> {
        self.assign_on(params, Utc::now().date_naive())
    }

    /// Create a task with an explicit creation date and append it.
    pub fn assign_on(&self, params: &AssignParams, created_at: NaiveDate) -> Result<Task, TaskError> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(TaskError::Validation("title is required".to_string()));
        }
        let assignee = Email::parse(&params.assigned_to)
            .map_err(|e| TaskError::Validation(format!("assignee: {e}")))?;
        let status = params.status.unwrap_or(TaskStatus::Pending);

        let mut tasks = self.store.tasks()?;
        let floor = tasks.iter().map(|t| t.id).max();
        let task = Task {
            id: self.ids.next_id(floor),
            title: title.to_string(),
            description: params.description.trim().to_string(),
            assigned_to: assignee.into(),
            status,
            created_at,
        };
        tasks.push(task.clone());
        self.store.put_tasks(&tasks)?;

        info!(task_id = %task.id, assignee = %task.assigned_to, status = %task.status, "assigned task");
        Ok(task)
    }

    /// Change the status of a task on behalf of `requested_by`.
    ///
    /// Only the assignee may do this, and only towards `Completed`.
    pub fn set_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        requested_by: &str,
    ) -> Result<Task, TaskError> {
        let mut tasks = self.store.tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;

        if !task.is_assigned_to(requested_by) {
            return Err(TaskError::NotAuthorized {
                task_id: id,
                email: requested_by.trim().to_string(),
            });
        }

        if status != TaskStatus::Completed {
            return Err(TaskError::InvalidTransition {
                from: task.status,
                to: status,
            });
        }
        if task.status.is_terminal() {
            debug!(task_id = %id, "task already completed");
            return Ok(task.clone());
        }

        let from = task.status;
        task.status = TaskStatus::Completed;
        let updated = task.clone();
        self.store.put_tasks(&tasks)?;
        info!(task_id = %id, %from, "completed task");
        Ok(updated)
    }

    /// Delete a task. Returns `false` if no task matched.
    pub fn remove(&self, id: TaskId) -> Result<bool, TaskError> {
        let mut tasks = self.store.tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.store.put_tasks(&tasks)?;
        info!(task_id = %id, "removed task");
        Ok(true)
    }

    /// Look up a task by ID.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.store.tasks()?.into_iter().find(|t| t.id == id))
    }

    /// Every task in insertion order.
    pub fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.tasks()?)
    }

    /// Tasks assigned to `email`, matched case- and whitespace-insensitively.
    pub fn list_for_assignee(&self, email: &str) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.store.tasks()?;
        tasks.retain(|t| t.is_assigned_to(email));
        Ok(tasks)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
