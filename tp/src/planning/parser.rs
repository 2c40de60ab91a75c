//! Task response parsing and validation
//!
//! Turns the raw text an LLM returned into validated, normalized Tasks:
//!
//! 1. Extract the JSON payload, unwrapping a markdown fence if present
//! 2. Validate and normalize each task, building a name -> id table
//! 3. Resolve `dependsOn` entries (ids or task names) against that table
//!
//! Invalid dependency references are dropped silently; any other problem
//! fails the whole response.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use super::PlanError;
use crate::domain::{Priority, Task};

/// Parse a raw LLM response into tasks, deriving deadlines from today's UTC date
pub fn parse_and_validate_tasks(response: &str) -> Result<Vec<Task>, PlanError> {
    parse_tasks(response, Utc::now().date_naive())
}

/// Parse a raw LLM response into tasks as of `today`
pub fn parse_tasks(response: &str, today: NaiveDate) -> Result<Vec<Task>, PlanError> {
    debug!(response_len = response.len(), %today, "parse_tasks: called");
    let json = extract_json(response);

    let parsed: Value = serde_json::from_str(json).map_err(|e| PlanError::Parse(e.to_string()))?;
    let items = match parsed {
        Value::Array(items) => items,
        other => {
            debug!("parse_tasks: wrapping non-array value");
            vec![other]
        }
    };

    // First pass: validate and build the name -> id table
    let mut validated = Vec::with_capacity(items.len());
    let mut name_to_id: HashMap<String, u32> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        let task = validate_task(item, index, today)?;
        name_to_id.insert(task.task_name.to_lowercase(), task.id);
        validated.push((task, item));
    }

    if validated.is_empty() {
        return Err(PlanError::Validation("No valid tasks generated".to_string()));
    }

    // Second pass: rebuild dependsOn from the raw entries
    let task_count = validated.len();
    let tasks = validated
        .into_iter()
        .map(|(task, item)| {
            let raw_deps = item
                .get("dependsOn")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            Task {
                depends_on: resolve_dependencies(raw_deps, &name_to_id, task_count),
                ..task
            }
        })
        .collect();

    Ok(tasks)
}

/// Pull the JSON payload out of a response
///
/// A ```` ```json ```` fence wins over a plain ```` ``` ```` fence; only the
/// first fenced block is used. Without a fence the whole trimmed text is used.
pub fn extract_json(response: &str) -> &str {
    let text = response.trim();

    let inner = if let Some((_, rest)) = text.split_once("```json") {
        debug!("extract_json: json fence");
        until_fence(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        debug!("extract_json: plain fence");
        until_fence(rest)
    } else {
        text
    };

    inner.trim()
}

fn until_fence(text: &str) -> &str {
    text.split_once("```").map(|(body, _)| body).unwrap_or(text)
}

/// Validate one raw task and normalize it
///
/// `dependsOn` is left empty here; it is resolved once every task has an id.
pub fn validate_task(item: &Value, index: usize, today: NaiveDate) -> Result<Task, PlanError> {
    let position = index + 1;

    let task_name = required_text(item, "taskName")
        .ok_or_else(|| invalid(position, "taskName is required and must be a string"))?;
    let description = required_text(item, "description")
        .ok_or_else(|| invalid(position, "description is required and must be a string"))?;

    let raw_days = item
        .get("estimatedDays")
        .and_then(Value::as_f64)
        .filter(|days| *days > 0.0)
        .ok_or_else(|| invalid(position, "estimatedDays must be a positive number"))?;
    let estimated_days = raw_days.ceil().min(f64::from(u32::MAX)) as u32;

    let deadline = supplied_deadline(item.get("deadline")).unwrap_or_else(|| calculate_deadline(today, estimated_days));

    Ok(Task {
        id: position as u32,
        task_name,
        description,
        estimated_days,
        priority: Priority::normalize(item.get("priority")),
        depends_on: Vec::new(),
        deadline,
    })
}

fn invalid(position: usize, reason: &str) -> PlanError {
    PlanError::Validation(format!("Task {}: {}", position, reason))
}

/// A trimmed, non-empty string field
fn required_text(item: &Value, field: &str) -> Option<String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The model's own deadline, if it gave a truthy one
///
/// Strings are kept verbatim; other truthy values are kept as their JSON text.
fn supplied_deadline(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// `today + days`, formatted `YYYY-MM-DD`
pub fn calculate_deadline(today: NaiveDate, days: u32) -> String {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
        .format("%Y-%m-%d")
        .to_string()
}

/// Resolve raw dependency entries to task ids
///
/// Integral numbers in `1..=task_count` are kept, strings are matched against
/// task names case-insensitively, everything else is dropped. Order and
/// duplicates are preserved.
pub fn resolve_dependencies(raw: &[Value], name_to_id: &HashMap<String, u32>, task_count: usize) -> Vec<u32> {
    raw.iter()
        .filter_map(|dep| match dep {
            Value::Number(n) => numeric_dependency(n, task_count),
            Value::String(name) => name_to_id.get(name.to_lowercase().trim()).copied(),
            _ => None,
        })
        .collect()
}

fn numeric_dependency(n: &serde_json::Number, task_count: usize) -> Option<u32> {
    let id = match n.as_u64() {
        Some(id) => id,
        None => {
            let f = n.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 {
                debug!(value = f, "numeric_dependency: dropping non-integral reference");
                return None;
            }
            f as u64
        }
    };

    if (1..=task_count as u64).contains(&id) {
        Some(id as u32)
    } else {
        debug!(id, task_count, "numeric_dependency: dropping out-of-range reference");
        None
    }
}
