//! Task domain type
//!
//! A Task is one normalized unit of work inside a TaskPlan.

use serde::{Deserialize, Serialize};

use super::priority::Priority;

/// One validated task in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// 1-based position in the plan
    pub id: u32,

    /// Trimmed, non-empty name
    pub task_name: String,

    /// Trimmed, non-empty description
    pub description: String,

    /// Whole days, rounded up from the model's estimate
    pub estimated_days: u32,

    pub priority: Priority,

    /// IDs of tasks in the same plan this one depends on
    pub depends_on: Vec<u32>,

    /// `YYYY-MM-DD`, or whatever the model supplied
    pub deadline: String,
}
