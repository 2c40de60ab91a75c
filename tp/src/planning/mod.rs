//! Planning module - goal decomposition
//!
//! ```text
//! goal → validate_goal → PromptBuilder → LlmClient → parser → Vec<Task> → TaskPlan
//! ```
//!
//! The parser is the only part with real logic: it extracts JSON from the
//! model's free-form text, validates each task and resolves `dependsOn`
//! references by id or task name.

mod error;
mod goal;
pub mod parser;
mod planner;
mod prompt;

pub use error::PlanError;
pub use goal::{GoalError, MAX_GOAL_CHARS, MIN_GOAL_CHARS, validate_goal};
pub use parser::{parse_and_validate_tasks, parse_tasks};
pub use planner::TaskPlanner;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
