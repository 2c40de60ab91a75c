//! TaskPlan domain type
//!
//! The aggregate produced for one goal: the ordered task list plus summary
//! statistics derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::Task;

/// A generated plan for one goal
///
/// Fields are private so the derived totals always match the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlan {
    goal: String,
    task_plan: Vec<Task>,
    total_estimated_days: u64,
    task_count: usize,
    generated_at: DateTime<Utc>,
}

impl TaskPlan {
    /// Create a plan generated now
    pub fn new(goal: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self::with_generated_at(goal, tasks, Utc::now())
    }

    /// Create a plan with a specific timestamp (for testing or recovery)
    pub fn with_generated_at(goal: impl Into<String>, tasks: Vec<Task>, generated_at: DateTime<Utc>) -> Self {
        let total_estimated_days = tasks.iter().map(|t| u64::from(t.estimated_days)).sum();
        Self {
            goal: goal.into(),
            task_count: tasks.len(),
            task_plan: tasks,
            total_estimated_days,
            generated_at,
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn tasks(&self) -> &[Task] {
        &self.task_plan
    }

    pub fn total_estimated_days(&self) -> u64 {
        self.total_estimated_days
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
