//! Goal precondition checks
//!
//! Goals are validated before any provider call is made.

use thiserror::Error;

/// Minimum goal length in characters, after trimming
pub const MIN_GOAL_CHARS: usize = 10;

/// Maximum goal length in characters, after trimming
pub const MAX_GOAL_CHARS: usize = 1000;

/// Reasons a goal is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("Goal is required")]
    Missing,

    #[error("Goal must be at least 10 characters long")]
    TooShort,

    #[error("Goal must be less than 1000 characters")]
    TooLong,
}

/// Validate a goal and return it trimmed
pub fn validate_goal(goal: Option<&str>) -> Result<String, GoalError> {
    let goal = goal.ok_or(GoalError::Missing)?;
    if goal.is_empty() {
        return Err(GoalError::Missing);
    }

    let trimmed = goal.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_GOAL_CHARS {
        return Err(GoalError::TooShort);
    }
    if chars > MAX_GOAL_CHARS {
        return Err(GoalError::TooLong);
    }

    Ok(trimmed.to_string())
}
