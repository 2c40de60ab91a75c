//! Domain types for TaskPlanner
//!
//! Task records, their priority, and the TaskPlan aggregate.

mod plan;
mod priority;
mod task;

pub use plan::TaskPlan;
pub use priority::Priority;
pub use task::Task;
