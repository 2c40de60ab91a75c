//! TaskPlanner - goal decomposition into dependency-resolved task plans
//!
//! A goal is sent to a configured LLM provider once; the free-form answer is
//! parsed, validated and normalized into an ordered list of tasks with ids,
//! durations, priorities, resolved dependencies and deadlines.

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planning;
pub mod store;

pub use config::{Config, LlmConfig, Provider, ResolvedLlmConfig, StorageConfig};
pub use domain::{Priority, Task, TaskPlan};
pub use llm::{LlmClient, LlmError, create_client};
pub use planning::{GoalError, PlanError, TaskPlanner, parse_and_validate_tasks, validate_goal};
pub use store::{PlanStore, StoredPlan};
