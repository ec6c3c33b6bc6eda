//! Share of tasks in each status.

use std::collections::BTreeMap;

use serde::Serialize;
use taskboard_core::{Task, TaskStatus};

/// Count and percentage of one status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    /// Tasks in this status.
    pub count: usize,
    /// `count / total * 100`, 0 when there are no tasks.
    pub percent: f64,
}

/// Status breakdown of a task collection. Every status is present.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDistribution {
    /// Number of tasks counted.
    pub total: usize,
    /// Share per status.
    pub by_status: BTreeMap<TaskStatus, StatusShare>,
}

impl TaskDistribution {
    /// Share of `status`.
    pub fn get(&self, status: TaskStatus) -> StatusShare {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}

/// Count tasks per status.
#[allow(clippy::cast_precision_loss)]
pub fn task_distribution(tasks: &[Task]) -> TaskDistribution {
    let mut by_status: BTreeMap<TaskStatus, StatusShare> = TaskStatus::ALL
        .iter()
        .map(|s| (*s, StatusShare::default()))
        .collect();
    for task in tasks {
        if let Some(share) = by_status.get_mut(&task.status) {
            share.count += 1;
        }
    }

    let total = tasks.len();
    if total > 0 {
        for share in by_status.values_mut() {
            share.percent = share.count as f64 / total as f64 * 100.0;
        }
    }
    TaskDistribution { total, by_status }
}
